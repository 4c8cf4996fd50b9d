use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage, RgbaImage};
use rust_slideshow::buffer::PlaybackSequence;
use rust_slideshow::config::Pacing;
use rust_slideshow::events::{PlaybackCommand, Trigger};
use rust_slideshow::shell::Shell;
use rust_slideshow::tasks::playback::{PlaybackController, PlaybackState};
use rust_slideshow::tasks::timer::{DeadlineTimers, TimerToken};
use tempfile::{TempDir, tempdir};

const PACING: Pacing = Pacing {
    auto_advance: Duration::from_millis(1500),
    resume_delay: Duration::from_millis(2500),
    error_skip: Duration::from_millis(100),
};

struct FakeShell {
    now: Instant,
    timers: DeadlineTimers,
    scheduled: Vec<TimerToken>,
    drawn: Vec<(u32, u32)>,
    labels: Vec<String>,
    confirm_answer: bool,
    prompts: Vec<String>,
    errors: Vec<String>,
    fail_removal: bool,
    removed: Vec<PathBuf>,
    exited: bool,
}

impl FakeShell {
    fn new() -> Self {
        Self {
            now: Instant::now(),
            timers: DeadlineTimers::new(),
            scheduled: Vec::new(),
            drawn: Vec::new(),
            labels: Vec::new(),
            confirm_answer: true,
            prompts: Vec::new(),
            errors: Vec::new(),
            fail_removal: false,
            removed: Vec::new(),
            exited: false,
        }
    }

    fn pending_delay(&self) -> Option<Duration> {
        self.timers.next_deadline().map(|at| at - self.now)
    }
}

impl Shell for FakeShell {
    fn screen_size(&self) -> (u32, u32) {
        (64, 48)
    }

    fn draw_image_centered(&mut self, image: RgbaImage) {
        self.drawn.push(image.dimensions());
    }

    fn draw_label(&mut self, text: &str) {
        self.labels.push(text.to_string());
    }

    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = self.timers.schedule(self.now, delay);
        self.scheduled.push(token);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.cancel(token);
    }

    fn confirm_delete(&mut self, label: &str) -> bool {
        self.prompts.push(label.to_string());
        self.confirm_answer
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        if self.fail_removal {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        fs::remove_file(path)?;
        self.removed.push(path.to_path_buf());
        Ok(())
    }

    fn exit(&mut self) {
        self.exited = true;
    }
}

fn write_image(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(w, h, Rgb([200, 100, 50]))
        .save(&path)
        .unwrap();
    path
}

fn controller_for(dir: &TempDir, files: Vec<PathBuf>) -> PlaybackController<FakeShell> {
    let sequence = PlaybackSequence::from_vec(files).unwrap();
    PlaybackController::new(
        FakeShell::new(),
        sequence,
        vec![dir.path().to_path_buf()],
        PACING,
    )
}

/// Jump the fake clock to the next deadline and deliver what fired.
fn fire_next(controller: &mut PlaybackController<FakeShell>) {
    let shell = controller.shell_mut();
    let at = shell.timers.next_deadline().expect("a timer is pending");
    shell.now = at;
    let due = shell.timers.take_due(at);
    for token in due {
        controller.on_timer(token);
    }
}

fn three_images(dir: &TempDir) -> Vec<PathBuf> {
    vec![
        write_image(dir.path(), "a.png", 8, 6),
        write_image(dir.path(), "b.jpg", 8, 6),
        write_image(dir.path(), "c.bmp", 8, 6),
    ]
}

#[test]
fn start_shows_first_entry_and_arms_auto_interval() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());

    controller.start();

    assert_eq!(controller.state(), PlaybackState::Displaying);
    assert_eq!(controller.displayed(), Some(files[0].as_path()));
    assert_eq!(controller.sequence().cursor(), 1);
    assert_eq!(controller.shell().drawn, vec![(64, 48)]);
    assert_eq!(controller.shell().labels, vec!["a.png".to_string()]);
    assert_eq!(controller.pending_trigger(), Some(Trigger::Auto));
    assert_eq!(controller.shell().pending_delay(), Some(PACING.auto_advance));
}

#[test]
fn auto_advance_walks_the_sequence_and_wraps() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();

    fire_next(&mut controller);
    assert_eq!(controller.displayed(), Some(files[1].as_path()));
    fire_next(&mut controller);
    assert_eq!(controller.displayed(), Some(files[2].as_path()));
    fire_next(&mut controller);
    assert_eq!(controller.displayed(), Some(files[0].as_path()));
    assert_eq!(controller.sequence().cursor(), 1);
    assert_eq!(controller.shell().pending_delay(), Some(PACING.auto_advance));
}

#[test]
fn manual_navigation_uses_resume_delay() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();

    controller.handle(PlaybackCommand::Next);
    assert_eq!(controller.displayed(), Some(files[1].as_path()));
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
    assert_eq!(controller.shell().timers.len(), 1);
}

#[test]
fn next_then_previous_returns_to_the_earlier_entry() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();

    controller.next();
    assert_eq!(controller.displayed(), Some(files[1].as_path()));
    controller.previous();
    assert_eq!(controller.displayed(), Some(files[0].as_path()));
    assert_eq!(controller.sequence().cursor(), 1);

    // Previous from the first entry wraps to the last one.
    controller.previous();
    assert_eq!(controller.displayed(), Some(files[2].as_path()));
    assert_eq!(controller.sequence().cursor(), 0);
}

#[test]
fn confirmed_delete_removes_entry_and_shows_the_next() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();

    controller.handle(PlaybackCommand::Delete);

    assert!(!files[0].exists());
    assert_eq!(controller.shell().prompts, vec!["a.png".to_string()]);
    assert_eq!(controller.shell().removed, vec![files[0].clone()]);
    assert_eq!(controller.sequence().len(), 2);
    assert!(controller.sequence().cursor() < 2);
    assert_eq!(controller.sequence().as_slice(), &files[1..]);
    assert_eq!(controller.displayed(), Some(files[1].as_path()));
    assert_eq!(controller.state(), PlaybackState::Displaying);
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
    assert_eq!(controller.shell().timers.len(), 1);
}

#[test]
fn deleting_the_last_entry_wraps_to_the_first() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();
    controller.next();
    controller.next();
    assert_eq!(controller.displayed(), Some(files[2].as_path()));

    controller.delete();

    assert_eq!(controller.sequence().len(), 2);
    assert_eq!(controller.displayed(), Some(files[0].as_path()));
    assert_eq!(controller.sequence().cursor(), 1);
}

#[test]
fn deleting_the_only_entry_terminates_with_no_timer() {
    let dir = tempdir().unwrap();
    let only = write_image(dir.path(), "only.png", 4, 4);
    let mut controller = controller_for(&dir, vec![only.clone()]);
    controller.start();

    controller.delete();

    assert!(!only.exists());
    assert!(controller.is_terminal());
    assert!(controller.sequence().is_empty());
    assert!(controller.shell().exited);
    assert!(controller.shell().timers.is_empty());
    assert_eq!(controller.pending_trigger(), None);
}

#[test]
fn declined_delete_keeps_file_and_resumes() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.shell_mut().confirm_answer = false;
    controller.start();

    controller.delete();

    assert!(files[0].exists());
    assert_eq!(controller.sequence().len(), 3);
    assert_eq!(controller.state(), PlaybackState::Displaying);
    assert_eq!(controller.displayed(), Some(files[0].as_path()));
    assert_eq!(controller.pending_trigger(), Some(Trigger::Auto));
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
}

#[test]
fn failed_delete_is_reported_and_playback_resumes() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.shell_mut().fail_removal = true;
    controller.start();

    controller.delete();

    assert!(files[0].exists());
    assert_eq!(controller.sequence().len(), 3);
    let errors = &controller.shell().errors;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Could not delete image:\na.png"));
    assert!(errors[0].contains("denied"));
    assert_eq!(controller.state(), PlaybackState::Displaying);
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
}

#[test]
fn undecodable_entry_is_skipped_after_error_delay_and_kept() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("broken.jpg");
    fs::write(&broken, b"not an image").unwrap();
    let good = write_image(dir.path(), "good.png", 8, 8);
    let mut controller = controller_for(&dir, vec![broken.clone(), good.clone()]);

    controller.start();
    assert!(controller.shell().drawn.is_empty());
    assert_eq!(controller.pending_trigger(), Some(Trigger::PostError));
    assert_eq!(controller.shell().pending_delay(), Some(PACING.error_skip));
    assert_eq!(controller.sequence().cursor(), 1);

    fire_next(&mut controller);
    assert_eq!(controller.displayed(), Some(good.as_path()));
    assert_eq!(controller.shell().drawn, vec![(48, 48)]);
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
    assert_eq!(controller.sequence().len(), 2);

    // The broken file is retried on the next lap.
    fire_next(&mut controller);
    assert_eq!(controller.pending_trigger(), Some(Trigger::PostError));
    assert!(broken.exists());
}

#[test]
fn delete_during_error_skip_removes_the_image_on_screen() {
    let dir = tempdir().unwrap();
    let shown = write_image(dir.path(), "a.png", 8, 6);
    let broken = dir.path().join("broken.jpg");
    fs::write(&broken, b"not an image").unwrap();
    let last = write_image(dir.path(), "c.bmp", 8, 6);
    let mut controller = controller_for(&dir, vec![shown.clone(), broken.clone(), last.clone()]);

    controller.start();
    fire_next(&mut controller);
    assert_eq!(controller.pending_trigger(), Some(Trigger::PostError));
    assert_eq!(controller.sequence().cursor(), 2);
    assert_eq!(controller.displayed(), Some(shown.as_path()));

    controller.delete();

    assert!(!shown.exists());
    assert!(broken.exists());
    assert_eq!(controller.shell().removed, vec![shown.clone()]);
    assert_eq!(controller.sequence().as_slice(), &[broken, last.clone()]);
    assert_eq!(controller.displayed(), Some(last.as_path()));
    assert_eq!(controller.shell().timers.len(), 1);
    assert_eq!(controller.pending_trigger(), Some(Trigger::Auto));
    assert_eq!(controller.shell().pending_delay(), Some(PACING.resume_delay));
}

#[test]
fn stale_timer_tokens_are_ignored() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files.clone());
    controller.start();
    let first = controller.shell().scheduled[0];

    controller.next();
    let draws = controller.shell().drawn.len();
    controller.on_timer(first);

    assert_eq!(controller.shell().drawn.len(), draws);
    assert_eq!(controller.displayed(), Some(files[1].as_path()));
    assert_eq!(controller.shell().timers.len(), 1);
}

#[test]
fn at_most_one_timer_is_ever_pending() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files);
    controller.start();

    let commands = [
        PlaybackCommand::Next,
        PlaybackCommand::Next,
        PlaybackCommand::Previous,
        PlaybackCommand::Delete,
        PlaybackCommand::Previous,
        PlaybackCommand::Next,
    ];
    for command in commands {
        controller.handle(command);
        assert!(controller.shell().timers.len() <= 1, "after {command:?}");
        fire_next(&mut controller);
        assert!(controller.shell().timers.len() <= 1);
    }
}

#[test]
fn exit_cancels_timer_and_ignores_later_commands() {
    let dir = tempdir().unwrap();
    let files = three_images(&dir);
    let mut controller = controller_for(&dir, files);
    controller.start();

    controller.handle(PlaybackCommand::Exit);
    assert!(controller.is_terminal());
    assert!(controller.shell().exited);
    assert!(controller.shell().timers.is_empty());

    let draws = controller.shell().drawn.len();
    controller.handle(PlaybackCommand::Next);
    controller.handle(PlaybackCommand::Delete);
    controller.advance(Trigger::Auto);
    assert_eq!(controller.shell().drawn.len(), draws);
    assert!(controller.shell().timers.is_empty());
    assert!(controller.shell().prompts.is_empty());
}

#[test]
fn labels_are_relative_to_their_folder() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    let nested = write_image(&dir.path().join("sub"), "x.jpg", 4, 4);
    let mut controller = controller_for(&dir, vec![nested]);

    controller.start();

    assert_eq!(controller.shell().labels, vec!["sub / x.jpg".to_string()]);
}

//! Slideshow state machine: what to show, when to show the next one, and
//! how navigation and deletion change that.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::buffer::PlaybackSequence;
use crate::config::Pacing;
use crate::error::Error;
use crate::events::{PlaybackCommand, Trigger};
use crate::label::display_label;
use crate::shell::Shell;
use crate::tasks::loader::load_for_screen;
use crate::tasks::timer::TimerToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing has been shown yet.
    Idle,
    Displaying,
    /// A delete prompt is open; no timer is pending.
    AwaitingConfirmation,
    /// Sequence exhausted or the user exited.
    Terminal,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    token: TimerToken,
    trigger: Trigger,
}

/// Owns the playback sequence and drives an injected [`Shell`].
///
/// The cursor in the sequence always names the entry shown *next*; it moves
/// forward right after an entry is displayed.
pub struct PlaybackController<S: Shell> {
    shell: S,
    sequence: PlaybackSequence,
    roots: Vec<PathBuf>,
    pacing: Pacing,
    state: PlaybackState,
    displayed: Option<usize>,
    pending: Option<PendingTimer>,
}

impl<S: Shell> PlaybackController<S> {
    pub fn new(shell: S, sequence: PlaybackSequence, roots: Vec<PathBuf>, pacing: Pacing) -> Self {
        Self {
            shell,
            sequence,
            roots,
            pacing,
            state: PlaybackState::Idle,
            displayed: None,
            pending: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == PlaybackState::Terminal
    }

    pub fn sequence(&self) -> &PlaybackSequence {
        &self.sequence
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// Path of the entry currently on screen.
    pub fn displayed(&self) -> Option<&Path> {
        self.displayed
            .and_then(|idx| self.sequence.get(idx))
            .map(PathBuf::as_path)
    }

    /// Trigger of the timer currently armed, if any.
    pub fn pending_trigger(&self) -> Option<Trigger> {
        self.pending.map(|p| p.trigger)
    }

    /// Show the first entry.
    pub fn start(&mut self) {
        if self.state != PlaybackState::Idle {
            return;
        }
        info!(entries = self.sequence.len(), "starting slideshow");
        self.advance(Trigger::Auto);
    }

    pub fn handle(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Next => self.next(),
            PlaybackCommand::Previous => self.previous(),
            PlaybackCommand::Delete => self.delete(),
            PlaybackCommand::Exit => self.exit(),
        }
    }

    pub fn next(&mut self) {
        if self.accepts_navigation() {
            self.advance(Trigger::ManualNext);
        }
    }

    pub fn previous(&mut self) {
        if self.accepts_navigation() {
            self.advance(Trigger::ManualPrev);
        }
    }

    /// Deliver a fired timer. Tokens other than the pending one are stale and
    /// ignored.
    pub fn on_timer(&mut self, token: TimerToken) {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                self.advance(pending.trigger);
            }
            _ => debug!(?token, "ignoring stale timer"),
        }
    }

    /// Show the entry under the cursor (after moving back two for
    /// [`Trigger::ManualPrev`]) and arm the timer for the one after it.
    pub fn advance(&mut self, trigger: Trigger) {
        if matches!(
            self.state,
            PlaybackState::Terminal | PlaybackState::AwaitingConfirmation
        ) {
            return;
        }
        self.cancel_pending();
        if self.sequence.is_empty() {
            self.terminate("sequence is empty");
            return;
        }

        if trigger == Trigger::ManualPrev {
            self.sequence.step_back(2);
        }
        let index = self.sequence.cursor();
        let Some(path) = self.sequence.get(index).cloned() else {
            return;
        };

        match self.render_entry(&path) {
            Ok(()) => {
                debug!(?trigger, index, path = %path.display(), "displayed");
                self.displayed = Some(index);
                self.state = PlaybackState::Displaying;
                self.sequence.step_forward();
                let delay = if trigger.uses_resume_delay() {
                    self.pacing.resume_delay
                } else {
                    self.pacing.auto_advance
                };
                self.arm(delay, Trigger::Auto);
            }
            Err(err) => {
                warn!(?trigger, index, error = %err, "skipping image");
                self.sequence.step_forward();
                self.arm(self.pacing.error_skip, Trigger::PostError);
            }
        }
    }

    /// Ask for confirmation, then remove the displayed entry from storage and
    /// from the sequence.
    pub fn delete(&mut self) {
        if self.state != PlaybackState::Displaying {
            debug!(state = ?self.state, "delete ignored");
            return;
        }
        let Some(index) = self.displayed else {
            return;
        };
        let Some(path) = self.sequence.get(index).cloned() else {
            return;
        };

        self.cancel_pending();
        self.state = PlaybackState::AwaitingConfirmation;
        let label = display_label(&path, &self.roots);
        let confirmed = self.shell.confirm_delete(&label);
        self.state = PlaybackState::Displaying;

        if !confirmed {
            debug!(path = %path.display(), "delete declined");
            self.arm(self.pacing.resume_delay, Trigger::Auto);
            return;
        }

        if let Err(source) = self.shell.remove_file(&path) {
            let err = Error::DeletionFailed {
                path: path.clone(),
                source,
            };
            warn!(error = %err, "delete failed");
            self.shell
                .report_error(&format!("Could not delete image:\n{label}\n\n{err}"));
            self.arm(self.pacing.resume_delay, Trigger::Auto);
            return;
        }

        info!(path = %path.display(), "deleted image");
        self.sequence.remove(index);
        self.displayed = None;
        if self.sequence.is_empty() {
            self.terminate("last image deleted");
            return;
        }
        self.advance(Trigger::PostDelete);
    }

    pub fn exit(&mut self) {
        self.terminate("exit requested");
    }

    fn accepts_navigation(&self) -> bool {
        matches!(self.state, PlaybackState::Idle | PlaybackState::Displaying)
    }

    fn render_entry(&mut self, path: &Path) -> Result<(), Error> {
        let (screen_w, screen_h) = self.shell.screen_size();
        let image = load_for_screen(path, screen_w, screen_h)?;
        self.shell.draw_image_centered(image);
        self.shell.draw_label(&display_label(path, &self.roots));
        Ok(())
    }

    /// The only place a timer is scheduled; always cancels the previous one.
    fn arm(&mut self, delay: Duration, trigger: Trigger) {
        self.cancel_pending();
        let token = self.shell.schedule(delay);
        self.pending = Some(PendingTimer { token, trigger });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.shell.cancel(pending.token);
        }
    }

    fn terminate(&mut self, reason: &str) {
        if self.state == PlaybackState::Terminal {
            return;
        }
        self.cancel_pending();
        self.state = PlaybackState::Terminal;
        info!(reason, "slideshow stopped");
        self.shell.exit();
    }
}

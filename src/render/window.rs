//! Fullscreen winit window that presents the slideshow through softbuffer and
//! feeds input and timer expiries to the playback controller.

use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use anyhow::{Context, Result, anyhow};
use image::RgbaImage;
use softbuffer::{Context as SoftContext, Surface};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::buffer::PlaybackSequence;
use crate::config::{LabelOptions, Pacing, Settings};
use crate::dialogs::{Dialogs, NativeDialogs};
use crate::events::PlaybackCommand;
use crate::platform::Platform;
use crate::render::canvas::Canvas;
use crate::render::font::load_font;
use crate::shell::Shell;
use crate::tasks::playback::PlaybackController;
use crate::tasks::timer::{DeadlineTimers, TimerToken};

/// Delay before temporary focus measures are undone.
const SETTLE_FOCUS_AFTER: Duration = Duration::from_millis(200);
/// Pointer jitter tolerated before a screensaver exits.
const POINTER_SLACK_PX: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Keyboard navigation and deletion.
    Interactive,
    /// Any key, click or pointer movement ends playback.
    Screensaver,
}

/// Everything needed to start playback once a window exists.
#[derive(Debug)]
pub struct SlideshowRequest {
    pub sequence: PlaybackSequence,
    pub roots: Vec<PathBuf>,
    pub settings: Settings,
    pub mode: ViewMode,
}

#[derive(Debug)]
enum ViewerEvent {
    Cancelled,
}

type WindowHandle = Arc<Window>;

/// [`Shell`] backed by a winit window and a CPU framebuffer.
pub struct WindowShell {
    window: WindowHandle,
    _context: SoftContext<WindowHandle>,
    surface: Surface<WindowHandle, WindowHandle>,
    image: Option<RgbaImage>,
    label: String,
    font: Option<FontArc>,
    label_style: LabelOptions,
    timers: DeadlineTimers,
    platform: &'static dyn Platform,
    dialogs: NativeDialogs,
    exit_requested: bool,
}

impl WindowShell {
    fn new(
        window: WindowHandle,
        font: Option<FontArc>,
        label_style: LabelOptions,
        platform: &'static dyn Platform,
    ) -> Result<Self> {
        let context = SoftContext::new(window.clone())
            .map_err(|err| anyhow!("failed to create softbuffer context: {err}"))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|err| anyhow!("failed to create softbuffer surface: {err}"))?;
        Ok(Self {
            window,
            _context: context,
            surface,
            image: None,
            label: String::new(),
            font,
            label_style,
            timers: DeadlineTimers::new(),
            platform,
            dialogs: NativeDialogs,
            exit_requested: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn take_due(&mut self, now: Instant) -> Vec<TimerToken> {
        self.timers.take_due(now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn render(&mut self) {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (
            NonZeroU32::new(size.width.max(1)),
            NonZeroU32::new(size.height.max(1)),
        ) else {
            return;
        };
        if let Err(err) = self.surface.resize(width, height) {
            warn!(error = %err, "failed to resize surface");
            return;
        }

        let mut canvas = Canvas::new(width.get(), height.get());
        if let Some(image) = self.image.as_ref() {
            canvas.blit_rgba_centered(image);
        }
        self.draw_label_onto(&mut canvas);

        match self.surface.buffer_mut() {
            Ok(mut buffer) => {
                buffer.copy_from_slice(canvas.pixels());
                if let Err(err) = buffer.present() {
                    warn!(error = %err, "failed to present frame");
                }
            }
            Err(err) => warn!(error = %err, "failed to map frame buffer"),
        }
    }

    fn draw_label_onto(&self, canvas: &mut Canvas) {
        if !self.label_style.visible || self.label.is_empty() {
            return;
        }
        let Some(font) = self.font.as_ref() else {
            return;
        };
        let ui = self.window.scale_factor() as f32;
        let scale = PxScale::from(self.label_style.font_size * ui);
        let margin = self.label_style.margin * ui;
        let descent = font.as_scaled(scale).descent();
        let baseline = canvas.height() as f32 - margin + descent;
        // Dark offset copy keeps light text readable on bright images.
        canvas.draw_text(font, &self.label, [0, 0, 0], margin + 1.0, baseline + 1.0, scale);
        canvas.draw_text(
            font,
            &self.label,
            self.label_style.color,
            margin,
            baseline,
            scale,
        );
    }

    fn with_cursor_visible<T>(&mut self, f: impl FnOnce(&NativeDialogs) -> T) -> T {
        self.window.set_cursor_visible(true);
        let result = f(&self.dialogs);
        self.window.set_cursor_visible(false);
        self.window.request_redraw();
        result
    }
}

impl Shell for WindowShell {
    fn screen_size(&self) -> (u32, u32) {
        let size = self
            .window
            .current_monitor()
            .map(|monitor| monitor.size())
            .unwrap_or_else(|| self.window.inner_size());
        (size.width.max(1), size.height.max(1))
    }

    fn draw_image_centered(&mut self, image: RgbaImage) {
        self.image = Some(image);
        self.window.request_redraw();
    }

    fn draw_label(&mut self, text: &str) {
        text.clone_into(&mut self.label);
        self.window.request_redraw();
    }

    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.timers.schedule(Instant::now(), delay)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.cancel(token);
    }

    fn confirm_delete(&mut self, label: &str) -> bool {
        let prompt = self.platform.delete_prompt();
        let message = format!("{}\n\n{label}", prompt.question);
        self.with_cursor_visible(|dialogs| dialogs.confirm(prompt.title, &message))
    }

    fn report_error(&mut self, message: &str) {
        self.with_cursor_visible(|dialogs| dialogs.alert("Error", message));
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        self.platform.remove_file(path)
    }

    fn exit(&mut self) {
        self.exit_requested = true;
    }
}

/// Map a pressed key to a playback command in interactive mode.
pub fn command_for_key(platform: &dyn Platform, key: KeyCode) -> Option<PlaybackCommand> {
    match key {
        KeyCode::ArrowRight => Some(PlaybackCommand::Next),
        KeyCode::ArrowLeft => Some(PlaybackCommand::Previous),
        KeyCode::Escape => Some(PlaybackCommand::Exit),
        key if platform.is_delete_key(key) => Some(PlaybackCommand::Delete),
        _ => None,
    }
}

/// Whether the pointer has left the jitter radius around `origin`.
pub fn pointer_moved(origin: PhysicalPosition<f64>, now: PhysicalPosition<f64>) -> bool {
    let dx = now.x - origin.x;
    let dy = now.y - origin.y;
    dx.hypot(dy) > POINTER_SLACK_PX
}

fn with_app_id(attrs: WindowAttributes) -> WindowAttributes {
    #[cfg(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    {
        use winit::platform::wayland::WindowAttributesExtWayland;
        return attrs.with_name("rust-slideshow", "rust-slideshow");
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    {
        attrs
    }
}

struct SlideshowApp {
    request: Option<SlideshowRequest>,
    platform: &'static dyn Platform,
    mode: ViewMode,
    controller: Option<PlaybackController<WindowShell>>,
    settle_at: Option<Instant>,
    pointer_origin: Option<PhysicalPosition<f64>>,
    failure: Option<anyhow::Error>,
}

impl SlideshowApp {
    fn new(request: SlideshowRequest, platform: &'static dyn Platform) -> Self {
        Self {
            mode: request.mode,
            request: Some(request),
            platform,
            controller: None,
            settle_at: None,
            pointer_origin: None,
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(request) = self.request.take() else {
            return Ok(());
        };
        let attrs = with_app_id(
            Window::default_attributes()
                .with_title("Image Slideshow")
                .with_decorations(false)
                .with_fullscreen(Some(Fullscreen::Borderless(None)))
                .with_active(true),
        );
        let window = event_loop
            .create_window(attrs)
            .context("failed to create slideshow window")?;
        window.set_cursor_visible(false);
        let window = WindowHandle::new(window);

        let font = load_font(self.platform.font_families());
        let shell = WindowShell::new(
            window.clone(),
            font,
            request.settings.label.clone(),
            self.platform,
        )?;
        let pacing = Pacing::from(&request.settings);
        let mut controller = PlaybackController::new(shell, request.sequence, request.roots, pacing);

        self.platform.bring_to_front(&window);
        self.settle_at = Some(Instant::now() + SETTLE_FOCUS_AFTER);
        info!(
            mode = ?self.mode,
            platform = self.platform.name(),
            entries = controller.sequence().len(),
            auto_advance = %humantime::format_duration(pacing.auto_advance),
            resume_delay = %humantime::format_duration(pacing.resume_delay),
            "starting slideshow"
        );
        controller.start();
        self.controller = Some(controller);
        Ok(())
    }

    fn shell(&self) -> Option<&WindowShell> {
        self.controller.as_ref().map(PlaybackController::shell)
    }

    fn shell_mut(&mut self) -> Option<&mut WindowShell> {
        self.controller.as_mut().map(PlaybackController::shell_mut)
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, command: PlaybackCommand) {
        if let Some(controller) = self.controller.as_mut() {
            debug!(?command, "input command");
            controller.handle(command);
        }
        self.exit_if_finished(event_loop);
    }

    fn exit_if_finished(&mut self, event_loop: &ActiveEventLoop) {
        let finished = self
            .controller
            .as_ref()
            .is_some_and(|c| c.is_terminal() || c.shell().exit_requested());
        if finished {
            event_loop.exit();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        if self.mode == ViewMode::Screensaver {
            self.dispatch(event_loop, PlaybackCommand::Exit);
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(command) = command_for_key(self.platform, code) else {
            return;
        };
        if event.repeat && command == PlaybackCommand::Delete {
            return;
        }
        self.dispatch(event_loop, command);
    }

    fn handle_pointer(&mut self, event_loop: &ActiveEventLoop, position: PhysicalPosition<f64>) {
        if self.mode != ViewMode::Screensaver {
            return;
        }
        match self.pointer_origin {
            None => self.pointer_origin = Some(position),
            Some(origin) if pointer_moved(origin, position) => {
                debug!("pointer moved; ending screensaver");
                self.dispatch(event_loop, PlaybackCommand::Exit);
            }
            Some(_) => {}
        }
    }
}

impl ApplicationHandler<ViewerEvent> for SlideshowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.failure = Some(err);
            event_loop.exit();
            return;
        }
        self.exit_if_finished(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(shell) = self.shell() else {
            return;
        };
        if shell.window().id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!("slideshow window closed");
                self.dispatch(event_loop, PlaybackCommand::Exit);
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                shell.window().request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Some(shell) = self.shell_mut() {
                    shell.render();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } if self.mode == ViewMode::Screensaver => {
                self.dispatch(event_loop, PlaybackCommand::Exit);
            }
            WindowEvent::CursorMoved { position, .. } => self.handle_pointer(event_loop, position),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let now = Instant::now();
        if self.settle_at.is_some_and(|at| at <= now) {
            self.settle_at = None;
            self.platform.settle_focus(controller.shell().window());
        }
        for token in controller.shell_mut().take_due(now) {
            controller.on_timer(token);
        }
        if controller.is_terminal() || controller.shell().exit_requested() {
            event_loop.exit();
            return;
        }
        let wake = match (controller.shell().next_deadline(), self.settle_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        event_loop.set_control_flow(match wake {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        });
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Cancelled => {
                info!("slideshow received cancellation event");
                if let Some(controller) = self.controller.as_mut() {
                    controller.exit();
                }
                event_loop.exit();
            }
        }
    }
}

/// Run the slideshow until the sequence is exhausted, the user exits, or
/// `cancel` fires. Must be called from within a tokio runtime.
pub fn run_windowed(
    request: SlideshowRequest,
    platform: &'static dyn Platform,
    cancel: CancellationToken,
) -> Result<()> {
    let event_loop = EventLoop::<ViewerEvent>::with_user_event()
        .build()
        .context("failed to build slideshow event loop")?;
    let proxy = event_loop.create_proxy();

    let cancel_task = tokio::spawn(async move {
        cancel.cancelled().await;
        let _ = proxy.send_event(ViewerEvent::Cancelled);
    });

    let mut app = SlideshowApp::new(request, platform);
    let run_result = event_loop.run_app(&mut app);
    cancel_task.abort();

    run_result.context("slideshow event loop failed")?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

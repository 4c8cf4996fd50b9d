//! Boundary between the playback controller and whatever presents it.

use std::io;
use std::path::Path;
use std::time::Duration;

use image::RgbaImage;

use crate::tasks::timer::TimerToken;

/// Everything the playback controller needs from its surroundings.
///
/// The windowed implementation lives in [`crate::render::window`]; tests drive
/// the controller through an in-memory shell.
pub trait Shell {
    /// Pixel size images are fitted to.
    fn screen_size(&self) -> (u32, u32);

    /// Show `image` centered on a black background, replacing prior content.
    fn draw_image_centered(&mut self, image: RgbaImage);

    /// Replace the bottom-left text label.
    fn draw_label(&mut self, text: &str);

    /// Schedule a one-shot callback after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    fn cancel(&mut self, token: TimerToken);

    /// Ask the user whether the entry labelled `label` should be deleted.
    fn confirm_delete(&mut self, label: &str) -> bool;

    /// Tell the user something went wrong.
    fn report_error(&mut self, message: &str);

    /// Remove `path` using the platform's semantics (trash or unlink).
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;

    /// Close the presentation; no further commands will arrive.
    fn exit(&mut self);
}

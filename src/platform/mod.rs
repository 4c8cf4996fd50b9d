//! Per-OS capabilities: file removal semantics, window focus, fonts, and
//! where the folder list lives.

mod desktop;
mod macos;

use std::io;
use std::path::{Path, PathBuf};

use winit::keyboard::KeyCode;
use winit::window::Window;

pub use desktop::Desktop;
pub use macos::MacOs;

/// Title and question shown before removing an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePrompt {
    pub title: &'static str,
    pub question: &'static str,
}

pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extensions (lowercase, without dot) scanned when settings do not override them.
    fn default_extensions(&self) -> &'static [&'static str];

    /// Preferred label font families, most preferred first.
    fn font_families(&self) -> &'static [&'static str];

    /// Default location of the persisted folder list.
    fn folders_file(&self) -> Option<PathBuf>;

    /// Remove an image the way users of this OS expect.
    ///
    /// # Errors
    /// Returns the I/O error of the final removal attempt.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn delete_prompt(&self) -> DeletePrompt;

    fn is_delete_key(&self, key: KeyCode) -> bool {
        key == KeyCode::Delete
    }

    /// Raise and focus a freshly created fullscreen window.
    fn bring_to_front(&self, window: &Window);

    /// Undo any temporary focus measures taken by [`Platform::bring_to_front`].
    fn settle_focus(&self, _window: &Window) {}

    /// Text printed by `--install`.
    fn install_instructions(&self) -> &'static str;

    /// Starting directory for folder pickers.
    fn pictures_dir(&self) -> Option<PathBuf> {
        dirs::picture_dir().or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
    }
}

/// The implementation for the OS this binary was built for.
pub fn current() -> &'static dyn Platform {
    if cfg!(target_os = "macos") {
        &MacOs
    } else {
        &Desktop
    }
}

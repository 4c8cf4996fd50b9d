use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use winit::window::{Window, WindowLevel};

use super::{DeletePrompt, Platform};
use crate::scan::DEFAULT_EXTENSIONS;

/// Linux, the BSDs and Windows: permanent delete, Arial-like label font, and a
/// dotfile in the home directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Desktop;

impl Platform for Desktop {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn default_extensions(&self) -> &'static [&'static str] {
        DEFAULT_EXTENSIONS
    }

    fn font_families(&self) -> &'static [&'static str] {
        &["Arial", "Liberation Sans", "DejaVu Sans", "Noto Sans"]
    }

    fn folders_file(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join("ImageViewerScreensaver.config"))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn delete_prompt(&self) -> DeletePrompt {
        DeletePrompt {
            title: "Delete Image",
            question: "Do you really want to delete this image?",
        }
    }

    fn bring_to_front(&self, window: &Window) {
        // Stay on top only until the window has been mapped and focused.
        window.set_window_level(WindowLevel::AlwaysOnTop);
        window.focus_window();
    }

    fn settle_focus(&self, window: &Window) {
        window.set_window_level(WindowLevel::Normal);
        window.focus_window();
    }

    fn install_instructions(&self) -> &'static str {
        "To use the slideshow as a screensaver:\n\
         \n\
         1. Run it once without arguments and pick your image folders.\n\
         2. Point your screensaver or idle daemon at `slideshow --screensaver`\n\
            (for example xscreensaver, xidlehook or swayidle).\n\
         3. Use `slideshow --configure` to change the folder list later.\n"
    }
}

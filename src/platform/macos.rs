use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use winit::keyboard::KeyCode;
use winit::window::Window;

use super::{DeletePrompt, Platform};

/// macOS: system trash, TIFF in the default scan set, SF Pro label font, and
/// Application Support storage. HEIC/HEIF join the scan set with the `heic`
/// feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacOs;

#[cfg(not(all(target_os = "macos", feature = "heic")))]
const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif"];
#[cfg(all(target_os = "macos", feature = "heic"))]
const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "heic", "heif"];

impl Platform for MacOs {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn default_extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn font_families(&self) -> &'static [&'static str] {
        &["SF Pro Display", "SF Pro Text", "Helvetica Neue", "Helvetica"]
    }

    fn folders_file(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("ImageScreensaver").join("config.txt"))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        debug!(path = %path.display(), "moving to trash");
        match trash::delete(path) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "trash failed; deleting permanently");
                fs::remove_file(path)
            }
        }
    }

    fn delete_prompt(&self) -> DeletePrompt {
        DeletePrompt {
            title: "Move to Trash",
            question: "Do you want to move this image to the Trash?",
        }
    }

    fn is_delete_key(&self, key: KeyCode) -> bool {
        matches!(key, KeyCode::Delete | KeyCode::Backspace)
    }

    fn bring_to_front(&self, window: &Window) {
        window.focus_window();
    }

    fn install_instructions(&self) -> &'static str {
        "To use the slideshow as a screensaver on macOS:\n\
         \n\
         1. Run it once without arguments and pick your image folders.\n\
         2. Wrap `slideshow --screensaver` in an app bundle or a launch agent\n\
            triggered by your idle tool of choice.\n\
         3. Use `slideshow --configure` to change the folder list later.\n"
    }
}

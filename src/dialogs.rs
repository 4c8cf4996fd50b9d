use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Answer to a three-way prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    Cancel,
}

/// Native dialogs used around playback: folder picking, yes/no prompts and
/// error notices.
pub trait Dialogs {
    /// `None` when the user cancelled.
    fn pick_folder(&self, title: &str, initial_dir: Option<&Path>) -> Option<PathBuf>;

    fn confirm(&self, title: &str, message: &str) -> bool;

    fn choose(&self, title: &str, message: &str) -> Choice;

    fn alert(&self, title: &str, message: &str);
}

/// [`Dialogs`] backed by the OS through `rfd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_folder(&self, title: &str, initial_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title(title);
        if let Some(dir) = initial_dir.filter(|dir| dir.is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder()
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(result, MessageDialogResult::Yes)
    }

    fn choose(&self, title: &str, message: &str) -> Choice {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNoCancel)
            .show();
        match result {
            MessageDialogResult::Yes => Choice::Yes,
            MessageDialogResult::No => Choice::No,
            _ => Choice::Cancel,
        }
    }

    fn alert(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

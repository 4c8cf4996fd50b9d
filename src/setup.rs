//! Interactive folder selection shown on first run and by `--configure`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dialogs::{Choice, Dialogs};

const APP_TITLE: &str = "Image Slideshow";

/// Ask for folders one at a time until the user cancels the picker or
/// declines to add another. Duplicates are ignored.
pub fn select_folders_interactively(
    dialogs: &dyn Dialogs,
    initial_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut folders: Vec<PathBuf> = Vec::new();
    loop {
        let title = format!(
            "Select Images Folder {} (Cancel to finish)",
            folders.len() + 1
        );
        let start = folders.last().map(PathBuf::as_path).or(initial_dir);
        let Some(folder) = dialogs.pick_folder(&title, start) else {
            break;
        };
        if folders.contains(&folder) {
            debug!(folder = %folder.display(), "folder already selected");
        } else {
            info!(folder = %folder.display(), "folder selected");
            folders.push(folder);
        }
        let question = format!(
            "Added {} folder(s). Add another folder?",
            folders.len()
        );
        if !dialogs.confirm("Add More Folders?", &question) {
            break;
        }
    }
    folders
}

/// Edit an existing folder list. Returns `None` when the user chose not to
/// save, otherwise the edited list.
pub fn edit_folder_list(
    dialogs: &dyn Dialogs,
    current: &[PathBuf],
    initial_dir: Option<&Path>,
) -> Option<Vec<PathBuf>> {
    let mut folders = current.to_vec();
    loop {
        let message = format!(
            "{}\n\nYes: add a folder\nNo: remove a folder\nCancel: finish",
            describe(&folders)
        );
        match dialogs.choose(APP_TITLE, &message) {
            Choice::Yes => {
                if let Some(folder) = dialogs.pick_folder("Add Images Folder", initial_dir) {
                    if folders.contains(&folder) {
                        dialogs.alert(APP_TITLE, "That folder is already in the list.");
                    } else {
                        info!(folder = %folder.display(), "folder added");
                        folders.push(folder);
                    }
                }
            }
            Choice::No => {
                if folders.is_empty() {
                    dialogs.alert(APP_TITLE, "There are no folders to remove.");
                    continue;
                }
                let start = folders.first().map(PathBuf::as_path);
                if let Some(folder) = dialogs.pick_folder("Remove Images Folder", start) {
                    if let Some(pos) = folders.iter().position(|f| *f == folder) {
                        info!(folder = %folder.display(), "folder removed");
                        folders.remove(pos);
                    } else {
                        dialogs.alert(APP_TITLE, "That folder is not in the list.");
                    }
                }
            }
            Choice::Cancel => break,
        }
    }
    if folders.as_slice() == current {
        return Some(folders);
    }
    let question = format!("{}\n\nSave these folders?", describe(&folders));
    dialogs.confirm(APP_TITLE, &question).then_some(folders)
}

fn describe(folders: &[PathBuf]) -> String {
    if folders.is_empty() {
        return "No folders are configured.".to_string();
    }
    let mut text = String::from("Current folders:");
    for folder in folders {
        text.push_str("\n  ");
        text.push_str(&folder.to_string_lossy());
    }
    text
}

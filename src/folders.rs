//! Persisted list of image folders: one absolute path per line.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FolderStore {
    path: PathBuf,
}

impl FolderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved folders that still exist. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved folder list");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let folders = parse_folder_list(&text);
        debug!(path = %self.path.display(), count = folders.len(), "loaded folder list");
        Ok(folders)
    }

    /// Overwrite the file with `folders`, one per line.
    pub fn save(&self, folders: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, render_folder_list(folders))
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), count = folders.len(), "saved folder list");
        Ok(())
    }
}

/// Trimmed, non-empty lines naming existing directories.
pub fn parse_folder_list(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
        .collect()
}

pub fn render_folder_list(folders: &[PathBuf]) -> String {
    let mut out = String::new();
    for folder in folders {
        out.push_str(&folder.to_string_lossy());
        out.push('\n');
    }
    out
}

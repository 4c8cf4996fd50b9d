//! Directory scanning utilities for discovering image files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::Error;

/// Extensions every platform can show (lowercase, without dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Options controlling directory scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Allowed extensions (lowercase, without dot).
    pub exts: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Prune dot-directories below each root.
    pub skip_hidden_dirs: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exts: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            follow_links: false,
            skip_hidden_dirs: false,
        }
    }
}

/// Return `true` if `path` has one of the allowed extensions (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
        })
}

/// Walk every root recursively and collect supported images, in walk order.
///
/// # Errors
/// Returns [`Error::BadDir`] if any root is missing or not a directory.
pub fn scan_with_options(roots: &[PathBuf], opts: &ScanOptions) -> Result<Vec<PathBuf>, Error> {
    // Validate inputs first (collect all bad ones).
    let bad: Vec<&PathBuf> = roots.iter().filter(|p| !p.is_dir()).collect();
    if !bad.is_empty() {
        let joined = bad
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::BadDir(joined));
    }

    let mut out = Vec::new();
    for root in roots {
        let before = out.len();
        for entry in WalkDir::new(root)
            .follow_links(opts.follow_links)
            .into_iter()
            .filter_entry(|e| !(opts.skip_hidden_dirs && is_hidden_dir(e)))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_supported_image(entry.path(), &opts.exts) {
                out.push(entry.into_path());
            }
        }
        debug!(root = %root.display(), found = out.len() - before, "scanned root");
    }

    Ok(out)
}

/// Scan all roots and fail with [`Error::EmptyScan`] when nothing was found.
///
/// # Errors
/// Propagates [`scan_with_options`] errors, plus [`Error::EmptyScan`].
pub fn discover(roots: &[PathBuf], opts: &ScanOptions) -> Result<Vec<PathBuf>, Error> {
    let found = scan_with_options(roots, opts)?;
    if found.is_empty() {
        return Err(Error::EmptyScan);
    }
    Ok(found)
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        let exts: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        assert!(is_supported_image(Path::new("/x/A.JPG"), &exts));
        assert!(is_supported_image(Path::new("b.Jpeg"), &exts));
        assert!(is_supported_image(Path::new("c.bmp"), &exts));
        assert!(!is_supported_image(Path::new("d.gif"), &exts));
        assert!(!is_supported_image(Path::new("png"), &exts));
    }

    #[test]
    fn dotted_extension_entries_are_accepted() {
        let exts = vec![".TIF".to_string()];
        assert!(is_supported_image(Path::new("scan.tif"), &exts));
    }
}

//! Display labels for entries, relative to the folder they were found in.

use std::path::{Component, Path, PathBuf};

const SEPARATOR: &str = " / ";

/// Label shown in the bottom-left corner and in delete prompts.
///
/// With one root the label is the relative path; with several it is prefixed by
/// the base name of the first root containing `entry`. Falls back to the
/// absolute path when no root contains it.
#[must_use]
pub fn display_label(entry: &Path, roots: &[PathBuf]) -> String {
    let Some((root, relative)) = owning_root(entry, roots) else {
        return entry.display().to_string();
    };
    let relative = join_components(relative);
    if roots.len() == 1 {
        return relative;
    }
    match root.file_name() {
        Some(name) => format!("{}{SEPARATOR}{relative}", name.to_string_lossy()),
        None => relative,
    }
}

/// First root that contains `entry`, with the path relative to it.
#[must_use]
pub fn owning_root<'a>(entry: &'a Path, roots: &'a [PathBuf]) -> Option<(&'a Path, &'a Path)> {
    roots.iter().find_map(|root| {
        let relative = entry.strip_prefix(root).ok()?;
        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        (!escapes && relative.components().next().is_some()).then_some((root.as_path(), relative))
    })
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

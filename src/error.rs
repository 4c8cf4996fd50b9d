use std::path::PathBuf;

use thiserror::Error;

/// Library error type for slideshow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more configured image folders are missing or not directories.
    #[error("invalid image folder: {0}")]
    BadDir(String),

    /// The scan completed but found no images.
    #[error("no images found in the selected folders")]
    EmptyScan,

    /// The file could not be opened or decoded as an image.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Scaling the decoded image to the screen failed.
    #[error("resize failed: {0}")]
    Resize(String),

    /// Removing an image from storage failed.
    #[error("could not delete {}: {source}", path.display())]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

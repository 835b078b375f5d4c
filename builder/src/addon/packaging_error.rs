//! Error types for add-on packaging operations.
//!
//! Covers directory traversal, I/O, and zip failures that can occur while
//! writing the `.mcaddon` archive.

use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from add-on packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (reading pack files, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// Walking a pack directory failed.
    #[error("failed to walk pack directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The zip writer rejected an entry or failed to finish the archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A pack directory path has no final component to name its entries.
    #[error("pack directory has no name: {0}")]
    UnnamedPackDir(PathBuf),

    /// Two pack directories share a name, so their entries would collide.
    #[error("pack directories {first} and {second} share the name \"{name}\"")]
    DuplicatePackName {
        /// The shared directory name.
        name: String,
        /// The first directory carrying it.
        first: PathBuf,
        /// The second directory carrying it.
        second: PathBuf,
    },
}

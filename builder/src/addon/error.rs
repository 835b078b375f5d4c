//! Error types for manifest parsing and validation.
//!
//! Each variant names the part of the manifest that failed validation so
//! the caller can attach the file path and report it verbatim.

use thiserror::Error;

/// Errors arising from a malformed pack manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest text is not valid JSON.
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("manifest root must be a JSON object")]
    NotAnObject,

    /// The `header` field is absent or not an object.
    #[error("manifest has no \"header\" object")]
    MissingHeader,

    /// The header carries no string `uuid`.
    #[error("manifest header has no string \"uuid\"")]
    MissingUuid,

    /// A version field is not a three-element array of integers.
    #[error("{location} version must be an array of three non-negative integers")]
    InvalidVersion {
        /// Where the offending version lives (for example `header`).
        location: String,
    },

    /// `modules` or `dependencies` is present but not an array of objects.
    #[error("\"{field}\" must be an array of objects")]
    InvalidList {
        /// The offending top-level field.
        field: &'static str,
    },
}

//! Error types for the SmellyBlox builder.
//!
//! A missing behavior pack manifest is the one failure the build expects and
//! reports as such; every other variant describes a fault that aborts the
//! run. Nothing is retried and nothing already written is rolled back.

use crate::addon::error::ManifestError;
use crate::addon::packaging_error::PackagingError;
use crate::addon::version::PackVersion;
use crate::config::ConfigError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while bumping versions or packaging the add-on.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The behavior pack manifest does not exist.
    #[error("behavior pack manifest not found at {path}")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// A manifest exists but could not be read.
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest {
        /// The manifest path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest was read but failed validation.
    #[error("invalid manifest {path}: {source}")]
    InvalidManifest {
        /// The manifest path.
        path: Utf8PathBuf,
        /// What was wrong with it.
        #[source]
        source: ManifestError,
    },

    /// A rewritten manifest could not be serialised.
    #[error("failed to serialise manifest {path}: {source}")]
    SerializeManifest {
        /// The manifest path.
        path: Utf8PathBuf,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// A rewritten manifest could not be written back.
    #[error("failed to write manifest {path}: {source}")]
    WriteManifest {
        /// The manifest path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The patch component is already at its maximum.
    #[error("cannot bump version {version}: patch component would overflow")]
    VersionOverflow {
        /// The version that could not be bumped.
        version: PackVersion,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// The output directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Packaging the archive failed.
    #[error("packaging failed: {0}")]
    Packaging(#[from] PackagingError),

    /// The build configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to write command output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;

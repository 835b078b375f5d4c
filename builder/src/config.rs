//! Build configuration: where the packs live and how releases are cut.
//!
//! Settings come from an optional `smellyblox.toml` and are then overridden
//! by command-line flags. Every field has a default matching the historical
//! layout (`BP/` and `RP/` next to the working directory), so a bare
//! invocation needs no configuration at all. Relative paths resolve against
//! the working directory.

use crate::addon::naming::DEFAULT_PREFIX;
use crate::addon::sync::DependencySync;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file discovered in the working directory.
pub const CONFIG_FILENAME: &str = "smellyblox.toml";

/// Name of the manifest file inside a pack directory.
const MANIFEST_FILENAME: &str = "manifest.json";

/// Errors arising from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Paths and policies for one build.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Behavior pack directory.
    pub behavior_pack: Utf8PathBuf,
    /// Resource pack directory.
    pub resource_pack: Utf8PathBuf,
    /// Behavior pack manifest; defaults to `<behavior_pack>/manifest.json`.
    pub behavior_manifest: Option<Utf8PathBuf>,
    /// Resource pack manifest; defaults to `<resource_pack>/manifest.json`.
    pub resource_manifest: Option<Utf8PathBuf>,
    /// Directory the archive is written to.
    pub output_dir: Utf8PathBuf,
    /// Name placed before the version in the archive filename.
    pub archive_prefix: String,
    /// Which resource pack dependencies follow the new version.
    pub dependency_sync: DependencySync,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            behavior_pack: Utf8PathBuf::from("BP"),
            resource_pack: Utf8PathBuf::from("RP"),
            behavior_manifest: None,
            resource_manifest: None,
            output_dir: Utf8PathBuf::from("."),
            archive_prefix: DEFAULT_PREFIX.to_owned(),
            dependency_sync: DependencySync::default(),
        }
    }
}

impl BuildConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`toml::de::Error`] for malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use smellyblox_builder::config::BuildConfig;
    ///
    /// let config = BuildConfig::from_toml_str("resource_pack = \"packs/RP\"\n")
    ///     .expect("valid config");
    /// assert_eq!(config.resource_manifest_path().as_str(), "packs/RP/manifest.json");
    /// assert_eq!(config.behavior_pack.as_str(), "BP");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read or
    /// [`ConfigError::Parse`] if it is invalid.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        debug!("loaded configuration from {path}");
        Self::from_toml_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Load `smellyblox.toml` from `dir` if it exists, otherwise return the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    pub fn discover(dir: &Utf8Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            debug!("no {CONFIG_FILENAME} in {dir}; using defaults");
            Ok(Self::default())
        }
    }

    /// Return the behavior pack manifest path.
    #[must_use]
    pub fn behavior_manifest_path(&self) -> Utf8PathBuf {
        self.behavior_manifest
            .clone()
            .unwrap_or_else(|| self.behavior_pack.join(MANIFEST_FILENAME))
    }

    /// Return the resource pack manifest path.
    #[must_use]
    pub fn resource_manifest_path(&self) -> Utf8PathBuf {
        self.resource_manifest
            .clone()
            .unwrap_or_else(|| self.resource_pack.join(MANIFEST_FILENAME))
    }

    /// Return the pack directories in archive order.
    #[must_use]
    pub fn pack_dirs(&self) -> [&Utf8Path; 2] {
        [self.behavior_pack.as_path(), self.resource_pack.as_path()]
    }
}

//! Archive naming policy for packaged add-ons.
//!
//! Archives are named `<prefix>(<major>.<minor>.<patch>).mcaddon`, so every
//! build lands next to earlier ones instead of replacing them.

use super::version::PackVersion;
use std::fmt;

/// The add-on name used when the configuration does not override it.
pub const DEFAULT_PREFIX: &str = "SmellyBlox";

/// The file extension Minecraft imports as an add-on bundle.
const ADDON_EXTENSION: &str = ".mcaddon";

/// A deterministic `.mcaddon` archive name.
///
/// # Examples
///
/// ```
/// use smellyblox_builder::addon::naming::AddonName;
/// use smellyblox_builder::addon::version::PackVersion;
///
/// let name = AddonName::new("SmellyBlox", PackVersion::new(1, 0, 7));
/// assert_eq!(name.to_string(), "SmellyBlox(1.0.7).mcaddon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonName {
    prefix: String,
    version: PackVersion,
}

impl AddonName {
    /// Create an archive name from a prefix and version.
    #[must_use]
    pub fn new(prefix: impl Into<String>, version: PackVersion) -> Self {
        Self {
            prefix: prefix.into(),
            version,
        }
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> PackVersion {
        self.version
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AddonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}){ADDON_EXTENSION}", self.prefix, self.version)
    }
}

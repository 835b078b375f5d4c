//! Pack version triple used by Bedrock manifests.
//!
//! Manifests store versions as a three-element JSON array
//! (`[major, minor, patch]`). [`PackVersion`] is the validated form of that
//! array; the patch bump is a pure function on it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A `[major, minor, patch]` version triple.
///
/// # Examples
///
/// ```
/// use smellyblox_builder::addon::version::PackVersion;
///
/// let current = PackVersion::new(1, 0, 4);
/// let next = current.next_patch().expect("patch below u32::MAX");
/// assert_eq!(next.to_string(), "1.0.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl PackVersion {
    /// Create a version from its three components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Return the major component.
    #[must_use]
    pub const fn major(self) -> u32 {
        self.major
    }

    /// Return the minor component.
    #[must_use]
    pub const fn minor(self) -> u32 {
        self.minor
    }

    /// Return the patch component.
    #[must_use]
    pub const fn patch(self) -> u32 {
        self.patch
    }

    /// Return the version with the patch component incremented by one.
    ///
    /// Major and minor are left untouched. Returns `None` when the patch
    /// component is already `u32::MAX`.
    #[must_use]
    pub const fn next_patch(self) -> Option<Self> {
        match self.patch.checked_add(1) {
            Some(patch) => Some(Self::new(self.major, self.minor, patch)),
            None => None,
        }
    }

    /// Return the components as an array, the shape manifests store.
    #[must_use]
    pub const fn as_array(self) -> [u32; 3] {
        [self.major, self.minor, self.patch]
    }

    /// Interpret a JSON value as a version triple.
    ///
    /// Returns `None` unless the value is an array of exactly three
    /// integers that each fit in a `u32`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let items = value.as_array()?;
        let [major, minor, patch] = items.as_slice() else {
            return None;
        };
        let component = |v: &serde_json::Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
        Some(Self::new(
            component(major)?,
            component(minor)?,
            component(patch)?,
        ))
    }

    /// Render the version as the JSON array manifests store.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self.as_array().to_vec())
    }
}

impl From<[u32; 3]> for PackVersion {
    fn from([major, minor, patch]: [u32; 3]) -> Self {
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for PackVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[u32; 3]>::deserialize(deserializer).map(Self::from)
    }
}

//! Bedrock pack manifest entity.
//!
//! A manifest is kept as the JSON object it was read from so that fields
//! this crate does not model (`format_version`, `name`, `metadata`, ...)
//! survive a rewrite unchanged and in their original order. Parsing
//! validates the parts the release flow depends on: a `header` object with
//! a `uuid` string and a `[major, minor, patch]` version, and well-formed
//! `modules` and `dependencies` lists when present.

use super::error::ManifestError;
use super::version::PackVersion;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

const HEADER: &str = "header";
const MODULES: &str = "modules";
const DEPENDENCIES: &str = "dependencies";
const VERSION: &str = "version";
const UUID: &str = "uuid";
const MODULE_NAME: &str = "module_name";

/// A validated pack manifest.
///
/// # Examples
///
/// ```
/// use smellyblox_builder::addon::manifest::PackManifest;
/// use smellyblox_builder::addon::version::PackVersion;
///
/// let json = r#"{
///     "format_version": 2,
///     "header": {"name": "SmellyBlox", "uuid": "bp-uuid", "version": [1, 0, 0]},
///     "modules": [{"type": "data", "uuid": "m1", "version": [1, 0, 0]}]
/// }"#;
/// let manifest = PackManifest::parse(json).expect("valid manifest");
/// assert_eq!(manifest.uuid(), "bp-uuid");
/// assert_eq!(manifest.version(), PackVersion::new(1, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PackManifest {
    document: Map<String, Value>,
    uuid: String,
    version: PackVersion,
}

/// Read-only view of one entry in a manifest's `dependencies` list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dependency<'a> {
    /// The `uuid` of the referenced pack, when the entry names one.
    pub uuid: Option<&'a str>,
    /// The `module_name` of a script module dependency.
    pub module_name: Option<&'a str>,
    /// True when the entry has a `module_name` key, whatever its value.
    pub has_module_name: bool,
    /// The raw `version` value; script modules use strings, packs use triples.
    pub version: Option<&'a Value>,
}

impl PackManifest {
    /// Parse and validate manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the text is not JSON, the root is not
    /// an object, the header lacks a `uuid` or a valid version triple, or
    /// `modules`/`dependencies` are not arrays of objects.
    pub fn parse(json: &str) -> Result<Self, ManifestError> {
        let Value::Object(document) = serde_json::from_str::<Value>(json)? else {
            return Err(ManifestError::NotAnObject);
        };

        let header = document
            .get(HEADER)
            .and_then(Value::as_object)
            .ok_or(ManifestError::MissingHeader)?;
        let uuid = header
            .get(UUID)
            .and_then(Value::as_str)
            .ok_or(ManifestError::MissingUuid)?
            .to_owned();
        let version = header
            .get(VERSION)
            .and_then(PackVersion::from_json)
            .ok_or_else(|| ManifestError::InvalidVersion {
                location: HEADER.to_owned(),
            })?;

        for field in [MODULES, DEPENDENCIES] {
            validate_object_list(&document, field)?;
        }

        Ok(Self {
            document,
            uuid,
            version,
        })
    }

    /// Return the header `uuid`.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Return the header version.
    #[must_use]
    pub fn version(&self) -> PackVersion {
        self.version
    }

    /// Return the version of each module, `None` where it is absent or
    /// not a valid triple.
    #[must_use]
    pub fn module_versions(&self) -> Vec<Option<PackVersion>> {
        list(&self.document, MODULES)
            .map(|module| module.get(VERSION).and_then(PackVersion::from_json))
            .collect()
    }

    /// Return views over the `dependencies` list, in file order.
    #[must_use]
    pub fn dependencies(&self) -> Vec<Dependency<'_>> {
        list(&self.document, DEPENDENCIES)
            .map(|dep| Dependency {
                uuid: dep.get(UUID).and_then(Value::as_str),
                module_name: dep.get(MODULE_NAME).and_then(Value::as_str),
                has_module_name: dep.contains_key(MODULE_NAME),
                version: dep.get(VERSION),
            })
            .collect()
    }

    /// Return a copy stamped with `version` in the header and every module.
    #[must_use]
    pub fn with_version(&self, version: PackVersion) -> Self {
        let mut next = self.clone();
        next.version = version;
        if let Some(header) = next.document.get_mut(HEADER).and_then(Value::as_object_mut) {
            header.insert(VERSION.to_owned(), version.to_json());
        }
        for module in list_mut(&mut next.document, MODULES) {
            module.insert(VERSION.to_owned(), version.to_json());
        }
        next
    }

    /// Stamp `version` onto every dependency accepted by `select`.
    ///
    /// Returns the indices of the rewritten entries.
    pub fn set_dependency_versions<F>(&mut self, version: PackVersion, mut select: F) -> Vec<usize>
    where
        F: FnMut(&Dependency<'_>) -> bool,
    {
        let selected: Vec<usize> = self
            .dependencies()
            .iter()
            .enumerate()
            .filter(|(_, dep)| select(dep))
            .map(|(index, _)| index)
            .collect();

        for (index, dep) in list_mut(&mut self.document, DEPENDENCIES).enumerate() {
            if selected.contains(&index) {
                dep.insert(VERSION.to_owned(), version.to_json());
            }
        }
        selected
    }

    /// Serialise the manifest with `indent` spaces per level and a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialisation fails.
    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.document.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(out)
    }
}

fn validate_object_list(
    document: &Map<String, Value>,
    field: &'static str,
) -> Result<(), ManifestError> {
    match document.get(field) {
        None => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_object) => Ok(()),
        Some(_) => Err(ManifestError::InvalidList { field }),
    }
}

fn list<'a>(
    document: &'a Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    document
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn list_mut<'a>(
    document: &'a mut Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    document
        .get_mut(field)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

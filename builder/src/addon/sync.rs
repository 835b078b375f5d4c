//! Release planning: the pure step between reading and writing manifests.
//!
//! [`plan_release`] takes the manifests as they are on disk and returns the
//! manifests as they should be written, plus a record of which resource
//! pack dependencies were rewritten. Nothing here touches the filesystem.

use super::manifest::{Dependency, PackManifest};
use super::version::PackVersion;
use crate::error::{BuildError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which resource pack dependencies receive the new version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DependencySync {
    /// Dependencies whose `uuid` matches the behavior pack, plus every
    /// dependency without a `module_name` key.
    ///
    /// This is the historical behaviour of the build script. It also
    /// re-pins dependencies on unrelated packs.
    #[default]
    UuidAndUnnamed,
    /// Only dependencies whose `uuid` matches the behavior pack.
    MatchingUuid,
}

impl DependencySync {
    /// Return true when `dependency` should be stamped with the new version.
    #[must_use]
    pub fn selects(self, dependency: &Dependency<'_>, behavior_uuid: &str) -> bool {
        let matches_behavior = dependency.uuid == Some(behavior_uuid);
        match self {
            Self::MatchingUuid => matches_behavior,
            Self::UuidAndUnnamed => matches_behavior || !dependency.has_module_name,
        }
    }
}

impl fmt::Display for DependencySync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UuidAndUnnamed => "uuid-and-unnamed",
            Self::MatchingUuid => "matching-uuid",
        })
    }
}

/// Manifests as read from disk.
#[derive(Debug, Clone)]
pub struct ReleaseInput {
    /// The behavior pack manifest.
    pub behavior: PackManifest,
    /// The resource pack manifest, when one exists.
    pub resource: Option<PackManifest>,
}

/// A resource pack dependency that the plan rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedDependency {
    /// Position in the `dependencies` list.
    pub index: usize,
    /// The dependency `uuid`, if it has one.
    pub uuid: Option<String>,
    /// True when the dependency points at the behavior pack.
    pub matches_behavior: bool,
}

impl fmt::Display for SyncedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uuid {
            Some(uuid) => write!(f, "dependencies[{}] ({uuid})", self.index),
            None => write!(f, "dependencies[{}] (no uuid)", self.index),
        }
    }
}

/// The computed next state of both manifests.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    /// Behavior pack version before the bump.
    pub previous: PackVersion,
    /// The new version shared by every rewritten field.
    pub version: PackVersion,
    /// The behavior manifest to write.
    pub behavior: PackManifest,
    /// The resource manifest to write, when one was read.
    pub resource: Option<PackManifest>,
    /// Resource pack dependencies rewritten by the plan.
    pub synced: Vec<SyncedDependency>,
}

impl ReleasePlan {
    /// Return the rewritten dependencies that do not point at the
    /// behavior pack.
    pub fn unrelated_syncs(&self) -> impl Iterator<Item = &SyncedDependency> {
        self.synced.iter().filter(|dep| !dep.matches_behavior)
    }
}

/// Compute the next release from the current manifests.
///
/// The behavior pack's patch version is incremented; its header and modules
/// take the new version. The resource pack, if present, takes the same
/// version in its header, its modules, and every dependency `policy`
/// selects.
///
/// # Errors
///
/// Returns [`BuildError::VersionOverflow`] when the patch component cannot
/// be incremented.
///
/// # Examples
///
/// ```
/// use smellyblox_builder::addon::manifest::PackManifest;
/// use smellyblox_builder::addon::sync::{DependencySync, ReleaseInput, plan_release};
///
/// let behavior = PackManifest::parse(
///     r#"{"header": {"uuid": "bp", "version": [1, 0, 0]}, "modules": []}"#,
/// )
/// .expect("valid manifest");
/// let input = ReleaseInput { behavior, resource: None };
///
/// let plan = plan_release(&input, DependencySync::MatchingUuid).expect("plan");
/// assert_eq!(plan.version.to_string(), "1.0.1");
/// ```
pub fn plan_release(input: &ReleaseInput, policy: DependencySync) -> Result<ReleasePlan> {
    let previous = input.behavior.version();
    let version = previous
        .next_patch()
        .ok_or(BuildError::VersionOverflow { version: previous })?;
    let behavior_uuid = input.behavior.uuid();

    let behavior = input.behavior.with_version(version);

    let mut synced = Vec::new();
    let resource = input.resource.as_ref().map(|current| {
        let mut next = current.with_version(version);
        let touched =
            next.set_dependency_versions(version, |dep| policy.selects(dep, behavior_uuid));
        let deps = current.dependencies();
        synced = touched
            .into_iter()
            .filter_map(|index| deps.get(index).map(|dep| (index, *dep)))
            .map(|(index, dep)| SyncedDependency {
                index,
                uuid: dep.uuid.map(str::to_owned),
                matches_behavior: dep.uuid == Some(behavior_uuid),
            })
            .collect();
        next
    });

    Ok(ReleasePlan {
        previous,
        version,
        behavior,
        resource,
        synced,
    })
}

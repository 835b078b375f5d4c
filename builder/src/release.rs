//! Release flow: read manifests, plan the bump, write, then package.
//!
//! This is the only module that touches the manifests on disk. The order
//! is fixed: read both manifests, compute the plan, write the behavior
//! manifest, write the resource manifest, then archive both pack trees.
//! A failure after the manifests are written leaves them bumped.

use crate::addon::manifest::PackManifest;
use crate::addon::naming::AddonName;
use crate::addon::packaging::{
    PackageOutput, PackageParams, collect_entries, ensure_distinct_pack_names, package_addon,
};
use crate::addon::sync::{ReleaseInput, ReleasePlan, plan_release};
use crate::addon::version::PackVersion;
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Indentation of the rewritten behavior pack manifest.
const BEHAVIOR_INDENT: usize = 2;

/// Indentation of the rewritten resource pack manifest.
const RESOURCE_INDENT: usize = 4;

/// Result of a successful [`build`].
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The release that was written to the manifests.
    pub release: ReleasePlan,
    /// The archive that was produced.
    pub package: PackageOutput,
}

/// What a build would do, computed without writing anything.
#[derive(Debug, Clone)]
pub struct BuildPreview {
    /// The release the build would write.
    pub release: ReleasePlan,
    /// Where the archive would be written.
    pub archive_path: Utf8PathBuf,
    /// Entry names the archive would contain.
    pub entries: Vec<String>,
}

/// Read the behavior pack manifest and return its current version.
///
/// # Errors
///
/// Returns [`BuildError::ManifestNotFound`] if the manifest is missing, or
/// a read/validation error if it cannot be used.
pub fn inspect(config: &BuildConfig) -> Result<PackVersion> {
    Ok(read_behavior(config)?.version())
}

/// Compute the next release without writing anything.
///
/// # Errors
///
/// Returns [`BuildError::ManifestNotFound`] if the behavior manifest is
/// missing, or any read, validation, or overflow error.
pub fn plan(config: &BuildConfig) -> Result<ReleasePlan> {
    let input = ReleaseInput {
        behavior: read_behavior(config)?,
        resource: read_resource(config)?,
    };
    plan_release(&input, config.dependency_sync)
}

/// Bump the patch version and propagate it to both manifests.
///
/// The behavior pack header and modules take the new version. When the
/// resource pack manifest exists, its header, modules, and the dependencies
/// selected by [`BuildConfig::dependency_sync`] take it too.
///
/// No file is touched unless both manifests were read and validated.
///
/// # Errors
///
/// Returns [`BuildError::ManifestNotFound`] if the behavior manifest is
/// missing. Other read, validation, overflow, or write failures are
/// returned as the matching [`BuildError`] variant.
pub fn bump_version(config: &BuildConfig) -> Result<ReleasePlan> {
    let release = plan(config)?;
    report_unrelated_syncs(&release);

    write_manifest(&config.behavior_manifest_path(), &release.behavior, BEHAVIOR_INDENT)?;
    info!("bumped {} -> {}", release.previous, release.version);

    if let Some(resource) = &release.resource {
        write_manifest(&config.resource_manifest_path(), resource, RESOURCE_INDENT)?;
        info!(
            "synced resource pack to {} ({} dependencies)",
            release.version,
            release.synced.len()
        );
    }

    Ok(release)
}

/// Bump the version, then package both pack trees into a `.mcaddon`.
///
/// Pack directory names are checked before the bump so a layout that can
/// never be archived does not consume a version.
///
/// # Errors
///
/// Returns any [`check_layout`] or [`bump_version`] error (in which case no
/// archive is produced), or any [`package`] error. Manifests stay bumped if
/// packaging fails.
pub fn build(config: &BuildConfig) -> Result<BuildOutput> {
    build_with(config, |_| {})
}

/// Run [`build`], calling `on_bumped` once the manifests are written and
/// before packaging starts.
///
/// # Errors
///
/// Returns the same errors as [`build`].
pub fn build_with<F>(config: &BuildConfig, on_bumped: F) -> Result<BuildOutput>
where
    F: FnOnce(&ReleasePlan),
{
    check_layout(config)?;
    let release = bump_version(config)?;
    on_bumped(&release);
    package(config, release)
}

/// Check that the configured pack directories can share one archive.
///
/// # Errors
///
/// Returns [`BuildError::Packaging`] when a pack directory has no usable
/// name or both directories share the same final component.
pub fn check_layout(config: &BuildConfig) -> Result<()> {
    ensure_distinct_pack_names(&pack_dirs(config))?;
    Ok(())
}

/// Archive both pack trees for an already-written `release`.
///
/// # Errors
///
/// Returns [`BuildError::CreateOutputDir`] or [`BuildError::Packaging`].
pub fn package(config: &BuildConfig, release: ReleasePlan) -> Result<BuildOutput> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| BuildError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let archive_path = archive_path(config, release.version);
    let package = package_addon(&PackageParams {
        pack_dirs: pack_dirs(config),
        archive_path: archive_path.into_std_path_buf(),
    })?;
    info!(
        "packaged {} file(s) into {}",
        package.entries.len(),
        package.archive_path.display()
    );

    Ok(BuildOutput { release, package })
}

/// Compute what [`build`] would do without writing anything.
///
/// # Errors
///
/// Returns the same read, validation, and packaging errors as [`build`],
/// except that nothing is written.
pub fn preview(config: &BuildConfig) -> Result<BuildPreview> {
    check_layout(config)?;

    let release = plan(config)?;
    report_unrelated_syncs(&release);

    let entries = collect_entries(&pack_dirs(config))?
        .into_iter()
        .map(|(_, name)| name)
        .collect();

    Ok(BuildPreview {
        archive_path: archive_path(config, release.version),
        release,
        entries,
    })
}

/// Return the archive path for `version` under the configured output
/// directory.
#[must_use]
pub fn archive_path(config: &BuildConfig, version: PackVersion) -> Utf8PathBuf {
    config
        .output_dir
        .join(AddonName::new(config.archive_prefix.as_str(), version).filename())
}

fn pack_dirs(config: &BuildConfig) -> Vec<PathBuf> {
    config
        .pack_dirs()
        .iter()
        .map(|dir| dir.as_std_path().to_path_buf())
        .collect()
}

fn read_behavior(config: &BuildConfig) -> Result<PackManifest> {
    let path = config.behavior_manifest_path();
    read_manifest(&path)?.ok_or(BuildError::ManifestNotFound { path })
}

fn read_resource(config: &BuildConfig) -> Result<Option<PackManifest>> {
    let path = config.resource_manifest_path();
    let manifest = read_manifest(&path)?;
    if manifest.is_none() {
        debug!("no resource pack manifest at {path}; skipping sync");
    }
    Ok(manifest)
}

/// Read and validate a manifest, returning `None` when the file is absent.
fn read_manifest(path: &Utf8Path) -> Result<Option<PackManifest>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(BuildError::ReadManifest {
                path: path.to_owned(),
                source,
            });
        }
    };
    PackManifest::parse(&text)
        .map(Some)
        .map_err(|source| BuildError::InvalidManifest {
            path: path.to_owned(),
            source,
        })
}

fn write_manifest(path: &Utf8Path, manifest: &PackManifest, indent: usize) -> Result<()> {
    let bytes = manifest
        .to_json_bytes(indent)
        .map_err(|source| BuildError::SerializeManifest {
            path: path.to_owned(),
            source,
        })?;
    std::fs::write(path, bytes).map_err(|source| BuildError::WriteManifest {
        path: path.to_owned(),
        source,
    })
}

fn report_unrelated_syncs(release: &ReleasePlan) {
    for dependency in release.unrelated_syncs() {
        warn!(
            "{dependency} does not point at the behavior pack but was re-pinned to {}; \
             set dependency_sync = \"matching-uuid\" to leave it alone",
            release.version
        );
    }
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;

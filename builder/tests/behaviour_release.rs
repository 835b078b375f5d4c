//! Behaviour-driven tests for the release flow.
//!
//! These scenarios build scratch add-on layouts in a temporary directory
//! and drive `release::build` and `release::bump_version` against them.
//! Tests use the rstest-bdd v0.5.0 mutable world pattern.

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use smellyblox_builder::addon::sync::DependencySync;
use smellyblox_builder::config::BuildConfig;
use smellyblox_builder::error::BuildError;
use smellyblox_builder::release;
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ReleaseWorld {
    temp_dir: Option<TempDir>,
    config: Option<BuildConfig>,
    error: Option<BuildError>,
}

#[fixture]
fn world() -> ReleaseWorld {
    ReleaseWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..ReleaseWorld::default()
    }
}

/// Return the UTF-8 root of the scratch layout.
fn root(world: &ReleaseWorld) -> Utf8PathBuf {
    let path = world.temp_dir.as_ref().expect("temp_dir set").path();
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("utf-8 temp dir")
}

fn config(world: &ReleaseWorld) -> &BuildConfig {
    world.config.as_ref().expect("config set")
}

fn parse_version(version: &str) -> [u32; 3] {
    let parts: Vec<u32> = version
        .split('.')
        .map(|part| part.parse().expect("numeric version part"))
        .collect();
    parts.try_into().expect("three version parts")
}

fn write_json(path: &Utf8Path, value: &Value) {
    fs::create_dir_all(path.parent().expect("parent dir")).expect("mkdir");
    fs::write(path, serde_json::to_string_pretty(value).expect("json")).expect("write");
}

fn read_json(path: &Utf8Path) -> Value {
    let text = fs::read_to_string(path).expect("read manifest");
    serde_json::from_str(&text).expect("manifest is JSON")
}

fn header_version(path: &Utf8Path) -> String {
    let manifest = read_json(path);
    let parts: Vec<String> = manifest["header"]["version"]
        .as_array()
        .expect("version array")
        .iter()
        .map(ToString::to_string)
        .collect();
    parts.join(".")
}

fn archive_entries(path: &Utf8Path) -> Vec<String> {
    let file = fs::File::open(path).expect("open archive");
    let archive = zip::ZipArchive::new(file).expect("read archive");
    archive.file_names().map(str::to_owned).collect()
}

fn archives(world: &ReleaseWorld) -> Vec<String> {
    let dist = config(world).output_dir.clone();
    if !dist.exists() {
        return Vec::new();
    }
    dist.read_dir_utf8()
        .expect("read dist")
        .map(|entry| entry.expect("dist entry").file_name().to_owned())
        .filter(|name| name.ends_with(".mcaddon"))
        .collect()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("an add-on at version \"{version}\"")]
fn given_addon(world: &mut ReleaseWorld, version: String) {
    let root = root(world);
    let version = parse_version(&version);
    let config = BuildConfig {
        behavior_pack: root.join("BP"),
        resource_pack: root.join("RP"),
        output_dir: root.join("dist"),
        ..BuildConfig::default()
    };

    write_json(
        &config.behavior_manifest_path(),
        &json!({
            "format_version": 2,
            "header": {"name": "SmellyBlox", "uuid": "bp-uuid", "version": version},
            "modules": [{"type": "data", "uuid": "bp-data", "version": version}],
            "dependencies": [{"module_name": "@minecraft/server", "version": "1.8.0"}]
        }),
    );
    write_json(
        &config.resource_manifest_path(),
        &json!({
            "format_version": 2,
            "header": {"name": "SmellyBlox RP", "uuid": "rp-uuid", "version": version},
            "modules": [{"type": "resources", "uuid": "rp-res", "version": version}],
            "dependencies": [
                {"uuid": "bp-uuid", "version": version},
                {"uuid": "shared-lib", "version": [3, 1, 0]}
            ]
        }),
    );
    fs::write(root.join("BP/main.js"), "// script").expect("write script");
    fs::create_dir_all(root.join("RP/textures")).expect("mkdir textures");
    fs::write(root.join("RP/textures/staff.png"), [137_u8, 80, 78, 71]).expect("write texture");

    world.config = Some(config);
}

#[given("the behavior pack manifest is missing")]
fn given_no_behavior_manifest(world: &mut ReleaseWorld) {
    fs::remove_file(config(world).behavior_manifest_path()).expect("remove manifest");
}

#[given("the resource pack is missing")]
fn given_no_resource_pack(world: &mut ReleaseWorld) {
    fs::remove_dir_all(&config(world).resource_pack).expect("remove RP");
}

#[given("the dependency sync policy \"{policy}\"")]
fn given_policy(world: &mut ReleaseWorld, policy: String) {
    let policy = DependencySync::from_str(&policy, false).expect("known policy");
    world.config.as_mut().expect("config set").dependency_sync = policy;
}

#[when("the add-on is built")]
fn when_built(world: &mut ReleaseWorld) {
    if let Err(err) = release::build(config(world)) {
        world.error = Some(err);
    }
}

#[when("the version is bumped")]
fn when_bumped(world: &mut ReleaseWorld) {
    if let Err(err) = release::bump_version(config(world)) {
        world.error = Some(err);
    }
}

#[then("the behavior pack version is \"{version}\"")]
fn then_behavior_version(world: &mut ReleaseWorld, version: String) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    assert_eq!(header_version(&config(world).behavior_manifest_path()), version);
}

#[then("the resource pack version is \"{version}\"")]
fn then_resource_version(world: &mut ReleaseWorld, version: String) {
    assert_eq!(header_version(&config(world).resource_manifest_path()), version);
}

#[then("the archive \"{name}\" contains \"{entry}\"")]
fn then_archive_contains(world: &mut ReleaseWorld, name: String, entry: String) {
    let path = config(world).output_dir.join(&name);
    let entries = archive_entries(&path);
    assert!(
        entries.contains(&entry),
        "{name} is missing {entry}: {entries:?}"
    );
}

#[then("the build fails because the manifest is missing")]
fn then_manifest_missing(world: &mut ReleaseWorld) {
    assert!(
        matches!(world.error, Some(BuildError::ManifestNotFound { .. })),
        "expected ManifestNotFound, got {:?}",
        world.error
    );
}

#[then("no archive is written")]
fn then_no_archive(world: &mut ReleaseWorld) {
    assert!(archives(world).is_empty(), "unexpected archives");
}

#[then("the dependency \"{uuid}\" is at version \"{version}\"")]
fn then_dependency_version(world: &mut ReleaseWorld, uuid: String, version: String) {
    let manifest = read_json(&config(world).resource_manifest_path());
    let dependency = manifest["dependencies"]
        .as_array()
        .expect("dependencies array")
        .iter()
        .find(|dep| dep["uuid"] == uuid.as_str())
        .expect("dependency present");
    assert_eq!(dependency["version"], json!(parse_version(&version)));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/release.feature",
    name = "Build bumps both manifests and writes the archive"
)]
fn scenario_build_bumps_and_packages(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Consecutive builds produce consecutive versions"
)]
fn scenario_consecutive_builds(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Missing behavior pack manifest aborts the build"
)]
fn scenario_missing_behavior_manifest(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Missing resource pack still builds the behavior pack"
)]
fn scenario_missing_resource_pack(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Historical policy re-pins every dependency with a uuid"
)]
fn scenario_historical_policy(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Matching policy leaves unrelated dependencies alone"
)]
fn scenario_matching_policy(world: ReleaseWorld) {
    let _ = world;
}

//! Output formatting for the builder CLI.
//!
//! Progress lines go to stderr so stdout carries only the result (the
//! archive path or the version), which keeps the binary easy to script.

use crate::addon::sync::ReleasePlan;
use crate::release::BuildPreview;
use camino::Utf8Path;
use std::path::Path;

/// Format the progress line printed once the new version is known.
#[must_use]
pub fn bump_message(release: &ReleasePlan) -> String {
    format!("Bumping version to {}...", release.version)
}

/// Format the progress line printed before the archive is written.
#[must_use]
pub fn building_message(archive_path: &Utf8Path) -> String {
    let name = archive_path.file_name().unwrap_or(archive_path.as_str());
    format!("Building {name}...")
}

/// Format the success message after packaging.
#[must_use]
pub fn success_message(archive_path: &Path, entries: usize, sha256: &str) -> String {
    let plural = if entries == 1 { "file" } else { "files" };
    format!(
        "Successfully created {} ({entries} {plural}, sha256 {sha256})",
        archive_path.display()
    )
}

/// Format the dry-run report for a bump, optionally with the archive that
/// a build would produce.
#[must_use]
pub fn dry_run_text(release: &ReleasePlan, preview: Option<&BuildPreview>) -> String {
    let mut lines = vec![
        "Dry run - no files will be modified".to_owned(),
        String::new(),
        format!("Current version: {}", release.previous),
        format!("Next version: {}", release.version),
        format!(
            "Resource pack: {}",
            if release.resource.is_some() {
                "synced"
            } else {
                "not found, skipped"
            }
        ),
    ];

    if !release.synced.is_empty() {
        lines.push(String::new());
        lines.push("Dependencies to re-pin:".to_owned());
        for dependency in &release.synced {
            let note = if dependency.matches_behavior {
                ""
            } else {
                " [not the behavior pack]"
            };
            lines.push(format!("  - {dependency}{note}"));
        }
    }

    if let Some(preview) = preview {
        lines.push(String::new());
        lines.push(format!("Archive: {}", preview.archive_path));
        lines.push(format!("Files to package: {}", preview.entries.len()));
        for entry in &preview.entries {
            lines.push(format!("  - {entry}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::manifest::PackManifest;
    use crate::addon::sync::{DependencySync, ReleaseInput, plan_release};
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};

    #[fixture]
    fn release() -> ReleasePlan {
        let behavior = PackManifest::parse(r#"{"header": {"uuid": "bp", "version": [1, 0, 4]}}"#)
            .expect("valid manifest");
        let resource = PackManifest::parse(concat!(
            r#"{"header": {"uuid": "rp", "version": [1, 0, 4]},"#,
            r#""dependencies": [{"uuid": "bp", "version": [1, 0, 4]},"#,
            r#"{"uuid": "lib", "version": [2, 0, 0]}]}"#,
        ))
        .expect("valid manifest");
        let input = ReleaseInput {
            behavior,
            resource: Some(resource),
        };
        plan_release(&input, DependencySync::UuidAndUnnamed).expect("plan")
    }

    #[rstest]
    fn bump_message_names_new_version(release: ReleasePlan) {
        assert_eq!(bump_message(&release), "Bumping version to 1.0.5...");
    }

    #[test]
    fn building_message_uses_file_name() {
        let path = Utf8PathBuf::from("dist/SmellyBlox(1.0.5).mcaddon");
        assert_eq!(building_message(&path), "Building SmellyBlox(1.0.5).mcaddon...");
    }

    #[rstest]
    #[case::singular(1, "1 file,")]
    #[case::plural(12, "12 files,")]
    fn success_message_pluralises_correctly(#[case] count: usize, #[case] expected: &str) {
        let msg = success_message(Path::new("SmellyBlox(1.0.5).mcaddon"), count, "abc");
        assert!(msg.starts_with("Successfully created SmellyBlox(1.0.5).mcaddon"));
        assert!(msg.contains(expected));
    }

    #[rstest]
    fn dry_run_text_flags_unrelated_dependencies(release: ReleasePlan) {
        let text = dry_run_text(&release, None);
        assert!(text.contains("Dry run"));
        assert!(text.contains("Current version: 1.0.4"));
        assert!(text.contains("Next version: 1.0.5"));
        assert!(text.contains("dependencies[0] (bp)\n"));
        assert!(text.contains("dependencies[1] (lib) [not the behavior pack]"));
        assert!(!text.contains("Archive:"));
    }

    #[rstest]
    fn dry_run_text_lists_archive_entries(release: ReleasePlan) {
        let preview = BuildPreview {
            archive_path: Utf8PathBuf::from("SmellyBlox(1.0.5).mcaddon"),
            entries: vec!["BP/manifest.json".to_owned(), "RP/manifest.json".to_owned()],
            release: release.clone(),
        };
        let text = dry_run_text(&release, Some(&preview));
        assert!(text.contains("Archive: SmellyBlox(1.0.5).mcaddon"));
        assert!(text.contains("Files to package: 2"));
        assert!(text.contains("  - RP/manifest.json"));
    }
}

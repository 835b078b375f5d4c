//! SmellyBlox builder CLI entrypoint.
//!
//! Bumps the add-on version and packages the behavior and resource packs
//! into a `.mcaddon` archive. Progress goes to stderr; the archive path (or
//! the version, for `version`) is printed on stdout.

use camino::Utf8Path;
use clap::Parser;
use smellyblox_builder::cli::{Cli, Command, RunArgs};
use smellyblox_builder::config::BuildConfig;
use smellyblox_builder::error::{BuildError, Result};
use smellyblox_builder::logging::init_logging;
use smellyblox_builder::output::{bump_message, building_message, dry_run_text, success_message};
use smellyblox_builder::release::{self, archive_path};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    if let Err(err) = init_logging(cli.verbosity, cli.quiet) {
        write_stderr_line(&mut stderr, format!("warning: logging unavailable: {err}"));
    }
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = resolve_config(cli)?;
    dispatch(cli, &config, stdout, stderr)
}

/// Runs the selected command against a resolved configuration.
fn dispatch(
    cli: &Cli,
    config: &BuildConfig,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    match cli.effective_command() {
        Command::Build(args) => run_build(config, &args, cli.quiet, stdout, stderr),
        Command::Bump(args) => run_bump(config, &args, cli.quiet, stdout, stderr),
        Command::Version => {
            let version = release::inspect(config)?;
            write_stdout_line(stdout, version)
        }
    }
}

/// Loads the configuration file, then applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<BuildConfig> {
    let mut config = match &cli.config {
        Some(path) => BuildConfig::load_from(path)?,
        None => BuildConfig::discover(Utf8Path::new("."))?,
    };
    cli.layout.apply_to(&mut config);
    Ok(config)
}

/// Bumps the version and packages the add-on.
fn run_build(
    config: &BuildConfig,
    args: &RunArgs,
    quiet: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    if args.dry_run {
        let preview = release::preview(config)?;
        write_stderr_line(stderr, dry_run_text(&preview.release, Some(&preview)));
        return Ok(());
    }

    let output = release::build_with(config, |release| {
        if !quiet {
            write_stderr_line(stderr, bump_message(release));
            write_stderr_line(
                stderr,
                building_message(&archive_path(config, release.version)),
            );
        }
    })?;
    if !quiet {
        write_stderr_line(
            stderr,
            success_message(
                &output.package.archive_path,
                output.package.entries.len(),
                &output.package.sha256,
            ),
        );
    }
    write_stdout_line(stdout, output.package.archive_path.display())
}

/// Bumps the version in the manifests without packaging.
fn run_bump(
    config: &BuildConfig,
    args: &RunArgs,
    quiet: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    if args.dry_run {
        let plan = release::plan(config)?;
        write_stderr_line(stderr, dry_run_text(&plan, None));
        return Ok(());
    }

    let release = release::bump_version(config)?;
    if !quiet {
        write_stderr_line(stderr, bump_message(&release));
    }
    write_stdout_line(stdout, release.version)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stdout_line(stdout: &mut dyn Write, message: impl std::fmt::Display) -> Result<()> {
    writeln!(stdout, "{message}").map_err(|source| BuildError::WriteFailed { source })
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Workspace {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp dir");
        std::fs::create_dir_all(root.join("BP")).expect("mkdir BP");
        std::fs::write(
            root.join("BP/manifest.json"),
            r#"{"header": {"uuid": "bp", "version": [1, 0, 0]}, "modules": []}"#,
        )
        .expect("write manifest");
        Workspace { _temp: temp, root }
    }

    fn cli_for(workspace: &Workspace, extra: &[&str]) -> Cli {
        let bp = workspace.root.join("BP");
        let rp = workspace.root.join("RP");
        let out = workspace.root.join("dist");
        let mut args = vec![
            "smellyblox-build",
            "--behavior-pack",
            bp.as_str(),
            "--resource-pack",
            rp.as_str(),
            "--output-dir",
            out.as_str(),
        ];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    /// Run with a config that points at the workspace, skipping file discovery.
    fn run_in(workspace: &Workspace, extra: &[&str]) -> (Result<()>, String, String) {
        let cli = cli_for(workspace, extra);
        let mut config = BuildConfig::default();
        cli.layout.apply_to(&mut config);

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let result = dispatch(&cli, &config, &mut stdout, &mut stderr);
        (
            result,
            String::from_utf8(stdout).expect("stdout utf-8"),
            String::from_utf8(stderr).expect("stderr utf-8"),
        )
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = BuildError::ManifestNotFound {
            path: Utf8PathBuf::from("BP/manifest.json"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(
            stderr_text.contains("error: behavior pack manifest not found at BP/manifest.json")
        );
    }

    #[rstest]
    fn build_reports_progress_and_prints_archive(workspace: Workspace) {
        let (result, stdout, stderr) = run_in(&workspace, &[]);
        result.expect("build succeeds");

        assert!(stdout.trim_end().ends_with("SmellyBlox(1.0.1).mcaddon"));
        assert!(stderr.contains("Bumping version to 1.0.1..."));
        assert!(stderr.contains("Building SmellyBlox(1.0.1).mcaddon..."));
        assert!(stderr.contains("Successfully created"));
    }

    #[rstest]
    fn quiet_build_prints_only_the_archive(workspace: Workspace) {
        let (result, stdout, stderr) = run_in(&workspace, &["-q"]);
        result.expect("build succeeds");

        assert!(stdout.contains("SmellyBlox(1.0.1).mcaddon"));
        assert!(stderr.is_empty());
    }

    #[rstest]
    fn dry_run_build_writes_nothing(workspace: Workspace) {
        let (result, stdout, stderr) = run_in(&workspace, &["--dry-run"]);
        result.expect("dry run succeeds");

        assert!(stdout.is_empty());
        assert!(stderr.contains("Next version: 1.0.1"));
        assert!(!workspace.root.join("dist").exists());
    }

    #[rstest]
    #[case::bump(&["--dry-run", "bump"])]
    #[case::build(&["--dry-run", "build"])]
    fn dry_run_before_subcommand_writes_nothing(workspace: Workspace, #[case] extra: &[&str]) {
        let manifest = workspace.root.join("BP/manifest.json");
        let before = std::fs::read(&manifest).expect("read manifest");

        let (result, stdout, stderr) = run_in(&workspace, extra);
        result.expect("dry run succeeds");

        assert!(stdout.is_empty());
        assert!(stderr.contains("Next version: 1.0.1"));
        assert_eq!(std::fs::read(&manifest).expect("read manifest"), before);
        assert!(!workspace.root.join("dist").exists());
    }

    #[rstest]
    fn bump_prints_new_version(workspace: Workspace) {
        let (result, stdout, _) = run_in(&workspace, &["bump"]);
        result.expect("bump succeeds");

        assert_eq!(stdout, "1.0.1\n");
        assert!(!workspace.root.join("dist").exists());
    }

    #[rstest]
    fn version_prints_current_version(workspace: Workspace) {
        let (result, stdout, _) = run_in(&workspace, &["version"]);
        result.expect("version succeeds");

        assert_eq!(stdout, "1.0.0\n");
    }

    #[rstest]
    fn missing_manifest_fails_without_output(workspace: Workspace) {
        std::fs::remove_file(workspace.root.join("BP/manifest.json")).expect("remove");

        let (result, stdout, _) = run_in(&workspace, &[]);

        assert!(matches!(result, Err(BuildError::ManifestNotFound { .. })));
        assert!(stdout.is_empty());
        assert!(!workspace.root.join("dist").exists());
    }

    #[test]
    fn resolve_config_reads_explicit_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("build.toml")).expect("utf-8");
        std::fs::write(&path, "archive_prefix = \"Stinky\"\noutput_dir = \"dist\"\n")
            .expect("write config");

        let cli = Cli::parse_from(["smellyblox-build", "--config", path.as_str(), "-o", "out"]);
        let config = resolve_config(&cli).expect("config resolves");

        assert_eq!(config.archive_prefix, "Stinky");
        assert_eq!(config.output_dir, "out");
    }
}

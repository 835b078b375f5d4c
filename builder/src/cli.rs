//! CLI argument definitions for the SmellyBlox builder.
//!
//! Running the binary with no subcommand performs a full build, so the
//! historical no-argument invocation keeps working.

use crate::addon::sync::DependencySync;
use crate::config::BuildConfig;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Bump the SmellyBlox add-on version and package it as a .mcaddon.
#[derive(Parser, Debug, Default)]
#[command(name = "smellyblox-build")]
#[command(version, about)]
#[command(long_about = concat!(
    "Bump the SmellyBlox add-on version and package it as a .mcaddon.\n\n",
    "The patch component of the behavior pack manifest version is incremented ",
    "and copied into the resource pack manifest. Both pack directories are then ",
    "zipped into SmellyBlox(<version>).mcaddon.\n\n",
    "Settings are read from smellyblox.toml in the working directory when present; ",
    "command-line flags take precedence.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Bump and package with the default BP/ and RP/ layout:\n",
    "    $ smellyblox-build\n\n",
    "  Preview the next release without writing anything:\n",
    "    $ smellyblox-build --dry-run\n\n",
    "  Only bump the manifests:\n",
    "    $ smellyblox-build bump\n\n",
    "  Print the current version:\n",
    "    $ smellyblox-build version\n\n",
    "  Leave unrelated resource pack dependencies alone:\n",
    "    $ smellyblox-build --dependency-sync matching-uuid",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Build arguments (used when no subcommand is given).
    #[command(flatten)]
    pub build: RunArgs,

    /// Pack layout and policy overrides.
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Read settings from this file instead of ./smellyblox.toml.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Increase log output (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet",
        global = true
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity", global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bump the version and package the add-on (default).
    Build(RunArgs),

    /// Bump the version in the manifests without packaging.
    Bump(RunArgs),

    /// Print the current behavior pack version.
    Version,
}

/// Arguments shared by the commands that write files.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Show what would change and exit without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Combine top-level and subcommand arguments; a flag set in either
    /// place is set.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            dry_run: self.dry_run || other.dry_run,
        }
    }
}

/// Overrides for [`BuildConfig`] fields.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutArgs {
    /// Behavior pack directory [default: BP].
    #[arg(long, value_name = "DIR", global = true)]
    pub behavior_pack: Option<Utf8PathBuf>,

    /// Resource pack directory [default: RP].
    #[arg(long, value_name = "DIR", global = true)]
    pub resource_pack: Option<Utf8PathBuf>,

    /// Behavior pack manifest [default: <behavior pack>/manifest.json].
    #[arg(long, value_name = "FILE", global = true)]
    pub behavior_manifest: Option<Utf8PathBuf>,

    /// Resource pack manifest [default: <resource pack>/manifest.json].
    #[arg(long, value_name = "FILE", global = true)]
    pub resource_manifest: Option<Utf8PathBuf>,

    /// Directory the archive is written to [default: .].
    #[arg(short, long, value_name = "DIR", global = true)]
    pub output_dir: Option<Utf8PathBuf>,

    /// Which resource pack dependencies receive the new version.
    #[arg(long, value_enum, value_name = "POLICY", global = true)]
    pub dependency_sync: Option<DependencySync>,
}

impl LayoutArgs {
    /// Overwrite the fields of `config` that were given on the command line.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8PathBuf;
    /// use smellyblox_builder::cli::LayoutArgs;
    /// use smellyblox_builder::config::BuildConfig;
    ///
    /// let args = LayoutArgs {
    ///     output_dir: Some(Utf8PathBuf::from("dist")),
    ///     ..LayoutArgs::default()
    /// };
    /// let mut config = BuildConfig::default();
    /// args.apply_to(&mut config);
    /// assert_eq!(config.output_dir, "dist");
    /// assert_eq!(config.behavior_pack, "BP");
    /// ```
    pub fn apply_to(&self, config: &mut BuildConfig) {
        if let Some(dir) = &self.behavior_pack {
            config.behavior_pack.clone_from(dir);
        }
        if let Some(dir) = &self.resource_pack {
            config.resource_pack.clone_from(dir);
        }
        if let Some(path) = &self.behavior_manifest {
            config.behavior_manifest = Some(path.clone());
        }
        if let Some(path) = &self.resource_manifest {
            config.resource_manifest = Some(path.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(policy) = self.dependency_sync {
            config.dependency_sync = policy;
        }
    }
}

impl Cli {
    /// Returns the command to run.
    ///
    /// With no subcommand this is [`Command::Build`] carrying the top-level
    /// build arguments. A `--dry-run` given before a subcommand applies to
    /// that subcommand.
    #[must_use]
    pub fn effective_command(&self) -> Command {
        match &self.command {
            None => Command::Build(self.build.clone()),
            Some(Command::Build(args)) => Command::Build(self.build.merged_with(args)),
            Some(Command::Bump(args)) => Command::Bump(self.build.merged_with(args)),
            Some(Command::Version) => Command::Version,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

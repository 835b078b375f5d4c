//! SmellyBlox add-on builder library.
//!
//! This crate bumps the add-on's manifest versions and packages the behavior
//! and resource packs into a `.mcaddon` archive. It backs the
//! `smellyblox-build` binary and can be driven programmatically, for example
//! against scratch pack layouts in tests.
//!
//! # Modules
//!
//! - [`addon`] - Versions, manifests, release planning, and packaging
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Build configuration and `smellyblox.toml` loading
//! - [`error`] - Error types for the release flow
//! - [`logging`] - Log subscriber setup for the binary
//! - [`output`] - Progress and dry-run text
//! - [`release`] - Bump and build operations over the on-disk manifests

pub mod addon;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod release;

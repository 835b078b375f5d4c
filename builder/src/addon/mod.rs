//! Add-on domain model: versions, manifests, release planning, and
//! packaging.
//!
//! # Sub-modules
//!
//! - [`error`] - Manifest validation errors.
//! - [`manifest`] - The `PackManifest` entity.
//! - [`naming`] - Archive naming policy (`AddonName`).
//! - [`packaging`] - Directory walk and `.mcaddon` archive creation.
//! - [`packaging_error`] - Error types for packaging operations.
//! - [`sync`] - Dependency sync policy and the pure release planner.
//! - [`version`] - The `[major, minor, patch]` triple (`PackVersion`).

pub mod error;
pub mod manifest;
pub mod naming;
pub mod packaging;
pub mod packaging_error;
pub mod sync;
pub mod version;

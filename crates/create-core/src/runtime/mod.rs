//! Runtime catalog, detection and installation
//!
//! This module provides:
//! - The Node.js release catalog and LTS resolution
//! - Local Node.js detection (async, via tokio::process)
//! - The install/keep decision
//! - A driver for the fnm version manager

pub mod catalog;
pub mod check;
pub mod reconcile;
pub mod tool;

pub use catalog::{major_version, ReleaseIndex, ReleaseInfo, VersionCatalog};
pub use check::check_node;
pub use reconcile::{plan, InstallReason, RuntimeAction};
pub use tool::{fnm_tool, VersionManager};

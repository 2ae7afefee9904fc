//! Template catalog, fetching and pulling
//!
//! This module provides:
//! - Template manifest types (TemplateDescriptor, TemplateCatalog)
//! - Catalog fetching from a remote URL or a local directory
//! - Pulling a template into a directory with an external tool

pub mod fetcher;
pub mod manifest;
pub mod puller;

pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{TemplateCatalog, TemplateDescriptor};
pub use puller::TemplatePuller;

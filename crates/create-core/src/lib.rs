//! Create Core - scaffolding projects from ModyQyW templates
//!
//! A run makes sure the machine is on the latest Node.js LTS, then pulls a
//! template from the ModyQyW template repository into a directory.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - Release catalog, Node.js detection, the fnm
//!   driver, template manifest fetching and the template puller
//! - **Layer 2: Workflow Orchestration** - [`Pipeline`] sequencing five stages
//!   over the [`Host`] and [`Prompter`] traits
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use create_core::{Pipeline, PipelineInput, SystemHost};
//!
//! let host = SystemHost::from_config(&MyConfig, None)?;
//! let mut pipeline = Pipeline::new(host, MyPrompter);
//! let ctx = pipeline.run(&PipelineInput::default()).await?;
//! ```

pub mod error;
pub mod host;
pub mod http;
pub mod pipeline;
pub mod product;
pub mod runtime;
pub mod templates;
pub mod update;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{CatalogKind, CreateError, Result};
pub use host::SystemHost;
pub use pipeline::{Host, Pipeline, PipelineInput, Prompter, RunContext, Stage, Step};
pub use product::ProductConfig;
pub use runtime::{ReleaseInfo, VersionCatalog};
pub use templates::{TemplateCatalog, TemplateDescriptor, TemplateFetcher, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;

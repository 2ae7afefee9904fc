//! Error types for the scaffolding pipeline
//!
//! Every failure a run can hit maps to one variant here. `RuntimeInstall` is the
//! only non-fatal one: the pipeline records it in the run context and carries on.

use std::fmt;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, CreateError>;

/// Which remote catalog a fetch was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Releases,
    Templates,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Releases => write!(f, "Node.js release list"),
            CatalogKind::Templates => write!(f, "template list"),
        }
    }
}

/// Main error type for a scaffolding run
#[derive(Error, Debug)]
pub enum CreateError {
    /// Network, status or parse failure on either catalog
    #[error("Could not fetch the {catalog}, please check your network: {reason}")]
    CatalogFetch { catalog: CatalogKind, reason: String },

    /// The version manager could not install or alias the LTS major
    #[error(
        "Could not install Node.js {major} with {tool} ({reason}). \
         Install {tool} from {install_url}, or install Node.js LTS {lts_version} manually."
    )]
    RuntimeInstall {
        tool: String,
        major: u64,
        lts_version: String,
        install_url: String,
        reason: String,
    },

    /// An interactive prompt was cancelled
    #[error("{prompt} prompt was cancelled")]
    SelectionAborted { prompt: &'static str },

    /// The template fetch tool failed
    #[error("Failed to pull template '{template}' into '{dir}': {reason}")]
    Pull {
        template: String,
        dir: String,
        reason: String,
    },

    /// Invalid configuration (e.g. a malformed override URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CreateError {
    pub fn catalog(catalog: CatalogKind, reason: impl fmt::Display) -> Self {
        CreateError::CatalogFetch {
            catalog,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_message_names_resource() {
        let releases = CreateError::catalog(CatalogKind::Releases, "HTTP 503");
        let templates = CreateError::catalog(CatalogKind::Templates, "HTTP 500");

        assert!(releases.to_string().contains("Node.js release list"));
        assert!(templates.to_string().contains("template list"));
        assert_ne!(releases.to_string(), templates.to_string());
    }

    #[test]
    fn test_install_error_names_tool_and_fallback() {
        let err = CreateError::RuntimeInstall {
            tool: "fnm".to_string(),
            major: 20,
            lts_version: "v20.10.0".to_string(),
            install_url: "https://github.com/Schniz/fnm".to_string(),
            reason: "command not found".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("fnm"));
        assert!(message.contains("https://github.com/Schniz/fnm"));
        assert!(message.contains("v20.10.0"));
    }
}

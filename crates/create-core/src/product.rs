//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to point the pipeline at its release
//! catalog, template manifest, template repository and external tools.

use crate::error::{CreateError, Result};
use url::Url;

/// Configuration trait for a scaffolding product
///
/// Defines:
/// - Product identity (name, display name)
/// - Catalog URLs and their environment overrides
/// - Template repository and fetch tool
/// - Runtime version manager
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (crate name, used for update checks)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default URL of the runtime release catalog
    fn default_release_index_url(&self) -> &'static str {
        "https://nodejs.org/dist/index.json"
    }

    /// Environment variable name for overriding the release catalog URL
    fn release_index_url_env(&self) -> &'static str;

    /// Default URL of the template manifest
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding the template manifest URL
    fn template_url_env(&self) -> &'static str;

    /// Environment variable that disables the update notice when set
    fn no_update_check_env(&self) -> &'static str;

    /// degit-style source prefix; the template name is appended to it
    fn template_repository(&self) -> &'static str;

    /// Program and leading arguments of the template fetch tool
    fn fetch_tool(&self) -> (&'static str, &'static [&'static str]) {
        ("pnpx", &["tiged"])
    }

    /// Upgrade/install command shown in update notices
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Resolved release catalog URL (env override first)
    fn release_index_url(&self) -> Result<Url> {
        resolve_url(self.release_index_url_env(), self.default_release_index_url())
    }

    /// Resolved template manifest URL (env override first)
    fn template_url(&self) -> Result<Url> {
        resolve_url(self.template_url_env(), self.default_template_url())
    }

    /// Whether the update notice should run
    fn update_check_enabled(&self) -> bool {
        std::env::var_os(self.no_update_check_env()).is_none()
    }
}

fn resolve_url(env: &str, default: &str) -> Result<Url> {
    let url_str = std::env::var(env).unwrap_or_else(|_| default.to_string());
    Url::parse(&url_str).map_err(|e| CreateError::Config(format!("Invalid URL '{}': {}", url_str, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "create-test"
        }
        fn display_name(&self) -> &'static str {
            "Create Test"
        }
        fn release_index_url_env(&self) -> &'static str {
            "CREATE_TEST_NODE_INDEX_URL"
        }
        fn default_template_url(&self) -> &'static str {
            "https://example.com/meta.json"
        }
        fn template_url_env(&self) -> &'static str {
            "CREATE_TEST_TEMPLATE_URL"
        }
        fn no_update_check_env(&self) -> &'static str {
            "CREATE_TEST_NO_UPDATE_CHECK"
        }
        fn template_repository(&self) -> &'static str {
            "owner/repo/templates"
        }
        fn upgrade_command(&self) -> &'static str {
            "cargo install create-test --force"
        }
    }

    #[test]
    fn test_default_urls() {
        let config = TestConfig;
        assert_eq!(
            config.release_index_url().unwrap().as_str(),
            "https://nodejs.org/dist/index.json"
        );
        assert_eq!(
            config.template_url().unwrap().as_str(),
            "https://example.com/meta.json"
        );
    }

    #[test]
    fn test_invalid_default_url_is_config_error() {
        let err = resolve_url("CREATE_TEST_UNSET_VARIABLE", "not a url").unwrap_err();
        assert!(matches!(err, CreateError::Config(_)));
    }

    #[test]
    fn test_default_fetch_tool() {
        let (program, args) = TestConfig.fetch_tool();
        assert_eq!(program, "pnpx");
        assert_eq!(args, &["tiged"]);
    }
}

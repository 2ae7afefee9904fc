//! Template manifest fetching from a remote URL or a local directory

use super::manifest::TemplateCatalog;
use crate::error::{CatalogKind, CreateError, Result};
use crate::http::CatalogClient;
use crate::product::ProductConfig;
use log::debug;
use std::path::PathBuf;
use tokio::fs;
use url::Url;

/// File name of the manifest inside a local template directory
pub const MANIFEST_FILE: &str = "meta.json";

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        Ok(Self::Remote(config.template_url()?))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Template fetcher - retrieves the template catalog
pub struct TemplateFetcher {
    source: TemplateSource,
    client: CatalogClient,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: CatalogClient::new(user_agent),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Fetch the manifest listing available templates
    pub async fn fetch_catalog(&self) -> Result<TemplateCatalog> {
        let catalog: TemplateCatalog = match &self.source {
            TemplateSource::Remote(url) => {
                self.client.get_json(url, CatalogKind::Templates).await?
            }
            TemplateSource::Local(path) => {
                let manifest_path = if path.is_dir() {
                    path.join(MANIFEST_FILE)
                } else {
                    path.clone()
                };
                let content = fs::read_to_string(&manifest_path).await.map_err(|e| {
                    CreateError::catalog(
                        CatalogKind::Templates,
                        format!("failed to read {}: {}", manifest_path.display(), e),
                    )
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    CreateError::catalog(
                        CatalogKind::Templates,
                        format!("failed to parse {}: {}", manifest_path.display(), e),
                    )
                })?
            }
        };

        if catalog.is_empty() {
            return Err(CreateError::catalog(
                CatalogKind::Templates,
                "the manifest lists no templates",
            ));
        }

        debug!("Loaded {} templates", catalog.len());
        Ok(catalog)
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}

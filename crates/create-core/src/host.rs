//! The production [`Host`]: real HTTP, `node`, `fnm` and `pnpx tiged`

use crate::error::Result;
use crate::pipeline::Host;
use crate::product::ProductConfig;
use crate::runtime::catalog::{ReleaseIndex, VersionCatalog};
use crate::runtime::check::check_node;
use crate::runtime::tool::{fnm_tool, VersionManager};
use crate::templates::fetcher::TemplateFetcher;
use crate::templates::manifest::TemplateCatalog;
use crate::templates::puller::TemplatePuller;
use std::path::PathBuf;

pub struct SystemHost {
    releases: ReleaseIndex,
    templates: TemplateFetcher,
    manager: VersionManager,
    puller: TemplatePuller,
}

impl SystemHost {
    pub fn new(
        releases: ReleaseIndex,
        templates: TemplateFetcher,
        manager: VersionManager,
        puller: TemplatePuller,
    ) -> Self {
        Self {
            releases,
            templates,
            manager,
            puller,
        }
    }

    /// Build from a product config; `template_dir` switches to a local manifest
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<Self> {
        let templates = match template_dir {
            Some(path) => TemplateFetcher::from_local(path, config.user_agent()),
            None => TemplateFetcher::from_config(config)?,
        };

        Ok(Self::new(
            ReleaseIndex::from_config(config)?,
            templates,
            fnm_tool(),
            TemplatePuller::from_config(config),
        ))
    }

    pub fn template_fetcher(&self) -> &TemplateFetcher {
        &self.templates
    }
}

impl Host for SystemHost {
    async fn fetch_releases(&self) -> Result<VersionCatalog> {
        self.releases.fetch().await
    }

    async fn node_version(&self) -> Option<String> {
        check_node().await
    }

    async fn install_lts(&self, major: u64, lts_version: &str) -> Result<()> {
        self.manager.install_lts(major, lts_version).await
    }

    async fn fetch_templates(&self) -> Result<TemplateCatalog> {
        self.templates.fetch_catalog().await
    }

    async fn pull(&self, template: &str, dir: &str) -> Result<()> {
        self.puller.pull(template, dir).await
    }
}

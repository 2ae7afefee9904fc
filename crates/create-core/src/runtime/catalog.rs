//! Node.js release catalog and LTS resolution

use crate::error::{CatalogKind, CreateError, Result};
use crate::http::CatalogClient;
use crate::product::ProductConfig;
use log::debug;
use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

/// The `lts` field: `false`, `true`, or an LTS codename like `"Iron"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LtsLine {
    Flag(bool),
    Codename(String),
}

impl Default for LtsLine {
    fn default() -> Self {
        LtsLine::Flag(false)
    }
}

/// One published runtime release (an entry of `index.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub version: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub lts: LtsLine,

    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub npm: Option<String>,

    #[serde(default)]
    pub v8: Option<String>,

    #[serde(default)]
    pub uv: Option<String>,

    #[serde(default)]
    pub zlib: Option<String>,

    #[serde(default)]
    pub openssl: Option<String>,

    #[serde(default)]
    pub modules: Option<String>,

    #[serde(default)]
    pub security: bool,
}

impl ReleaseInfo {
    pub fn is_lts(&self) -> bool {
        match &self.lts {
            LtsLine::Flag(flag) => *flag,
            LtsLine::Codename(name) => !name.is_empty(),
        }
    }
}

/// Releases newest first, with the LTS line resolved
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    releases: Vec<ReleaseInfo>,
    lts_index: usize,
    lts_major: u64,
}

impl VersionCatalog {
    /// Resolve the first LTS entry in catalog order
    pub fn new(releases: Vec<ReleaseInfo>) -> Result<Self> {
        let lts_index = releases.iter().position(ReleaseInfo::is_lts).ok_or_else(|| {
            CreateError::catalog(CatalogKind::Releases, "no LTS release found in the catalog")
        })?;

        let lts_version = &releases[lts_index].version;
        let lts_major = major_version(lts_version).ok_or_else(|| {
            CreateError::catalog(
                CatalogKind::Releases,
                format!("LTS release has an invalid version '{}'", lts_version),
            )
        })?;

        Ok(Self {
            releases,
            lts_index,
            lts_major,
        })
    }

    pub fn releases(&self) -> &[ReleaseInfo] {
        &self.releases
    }

    pub fn lts(&self) -> &ReleaseInfo {
        &self.releases[self.lts_index]
    }

    pub fn lts_version(&self) -> &str {
        &self.lts().version
    }

    pub fn lts_major(&self) -> u64 {
        self.lts_major
    }
}

/// Parse version string, handling a leading `v`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}

/// Leading integer component of a version string (`v20.10.0` -> 20)
pub fn major_version(version_str: &str) -> Option<u64> {
    if let Some(version) = parse_version(version_str) {
        return Some(version.major);
    }

    // Not full semver (e.g. "v20" or "20.1"): fall back to the leading digits
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Fetches the release catalog from the configured index URL
pub struct ReleaseIndex {
    url: Url,
    client: CatalogClient,
}

impl ReleaseIndex {
    pub fn new(url: Url, client: CatalogClient) -> Self {
        Self { url, client }
    }

    /// Create an index from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        Ok(Self::new(
            config.release_index_url()?,
            CatalogClient::new(config.user_agent()),
        ))
    }

    /// Download the catalog and resolve the LTS line
    pub async fn fetch(&self) -> Result<VersionCatalog> {
        let releases: Vec<ReleaseInfo> = self.client.get_json(&self.url, CatalogKind::Releases).await?;
        debug!("Fetched {} releases from {}", releases.len(), self.url);
        VersionCatalog::new(releases)
    }
}

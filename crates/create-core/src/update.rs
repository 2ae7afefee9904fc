//! One-shot "newer version available" notice
//!
//! Started in the background before the pipeline and collected at the end.
//! Never blocks a run: failures are logged at debug level and dropped.

use crate::product::ProductConfig;
use log::debug;
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;

/// crates.io endpoint for crate metadata
const CRATES_API: &str = "https://crates.io/api/v1/crates";

/// Budget for the registry request itself
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// How long the end of a run waits for a pending check
const GRACE_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    max_stable_version: Option<String>,
    max_version: String,
}

/// Compare the running version against the newest published one
/// Returns a notice if a newer version exists
pub fn newer_version_notice(current: &str, latest: &str, upgrade_command: &str) -> Option<String> {
    let current_ver = Version::parse(current).ok()?;
    let latest_ver = Version::parse(latest).ok()?;

    if current_ver < latest_ver {
        Some(format!(
            "Update available {} -> {}. Run: {}",
            current, latest, upgrade_command
        ))
    } else {
        None
    }
}

async fn latest_published(name: &str, user_agent: &str) -> anyhow::Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let response = client
        .get(format!("{}/{}", CRATES_API, name))
        .send()
        .await?
        .error_for_status()?;
    let body: CrateResponse = response.json().await?;
    Ok(body.krate.max_stable_version.unwrap_or(body.krate.max_version))
}

/// A background update check
pub struct UpdateCheck {
    handle: JoinHandle<Option<String>>,
}

impl UpdateCheck {
    /// Start the check unless the product's opt-out variable is set
    pub fn spawn<C: ProductConfig>(config: &C, current_version: &str) -> Option<Self> {
        if !config.update_check_enabled() {
            debug!("Update check disabled via {}", config.no_update_check_env());
            return None;
        }

        let name = config.name();
        let user_agent = config.user_agent();
        let upgrade_command = config.upgrade_command();
        let current = current_version.to_string();

        let handle = tokio::spawn(async move {
            match latest_published(name, user_agent).await {
                Ok(latest) => newer_version_notice(&current, &latest, upgrade_command),
                Err(e) => {
                    debug!("Update check failed: {:#}", e);
                    None
                }
            }
        });

        Some(Self { handle })
    }

    /// Collect the notice if the check finished within the grace period
    pub async fn finish(self) -> Option<String> {
        let mut handle = self.handle;
        match tokio::time::timeout(GRACE_PERIOD, &mut handle).await {
            Ok(Ok(notice)) => notice,
            Ok(Err(e)) => {
                debug!("Update check task failed: {}", e);
                None
            }
            Err(_) => {
                handle.abort();
                None
            }
        }
    }
}

//! Node.js version manager driver
//!
//! Installs a Node.js major through an external version manager (fnm by
//! default) and makes it the default alias, streaming the tool's output.

use crate::error::{CreateError, Result};
use colored::Colorize;
use log::{debug, info};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a single version manager step (downloads a full runtime)
const STEP_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for a version manager
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "fnm")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Where users can get the tool
    pub install_url: &'static str,
}

/// Installs and aliases runtime majors through a version manager
#[derive(Debug, Clone)]
pub struct VersionManager {
    config: ToolConfig,
}

impl VersionManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Commands run to install `major` and make it the default
    pub fn install_commands(&self, major: u64) -> Vec<Vec<String>> {
        let major = major.to_string();
        vec![
            vec!["install".to_string(), major.clone()],
            vec!["alias".to_string(), major, "default".to_string()],
        ]
    }

    /// Install `major` and alias it as default; `lts_version` is the manual fallback
    pub async fn install_lts(&self, major: u64, lts_version: &str) -> Result<()> {
        info!("Installing Node.js {} with {}", major, self.config.name);
        for args in self.install_commands(major) {
            self.run_step(&args)
                .await
                .map_err(|reason| self.install_error(major, lts_version, reason))?;
        }
        Ok(())
    }

    fn install_error(&self, major: u64, lts_version: &str, reason: String) -> CreateError {
        CreateError::RuntimeInstall {
            tool: self.config.display_name.to_string(),
            major,
            lts_version: lts_version.to_string(),
            install_url: self.config.install_url.to_string(),
            reason,
        }
    }

    /// Run one tool invocation, streaming its output
    async fn run_step(&self, args: &[String]) -> std::result::Result<(), String> {
        let cmd = format!("{} {}", self.config.name, args.join(" "));
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        debug!("spawning {}", cmd);

        let mut child = TokioCommand::new(self.config.name)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to run {}: {}", self.config.name, e))?;

        let stdout = child.stdout.take().ok_or("failed to capture stdout")?;
        let stderr = child.stderr.take().ok_or("failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(STEP_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            return Err(format!("`{}` timed out after {} seconds", cmd, STEP_TIMEOUT.as_secs()));
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(format!(
                "`{}` failed with exit code {}",
                cmd,
                status.code().unwrap_or(-1)
            )),
            Ok(Err(e)) => Err(format!("failed to wait for `{}`: {}", cmd, e)),
            Err(_) => {
                let _ = child.kill().await;
                Err(format!("`{}` hung after closing its output", cmd))
            }
        }
    }
}

/// Pre-configured version manager for fnm
pub fn fnm_tool() -> VersionManager {
    VersionManager::new(ToolConfig {
        name: "fnm",
        display_name: "fnm",
        install_url: "https://github.com/Schniz/fnm",
    })
}

//! Local Node.js detection

use log::debug;
use tokio::process::Command as TokioCommand;

/// Run `<program> --version` and return its trimmed stdout, if it runs
pub async fn check_runtime(program: &str) -> Option<String> {
    match TokioCommand::new(program).arg("--version").output().await {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            debug!("{} reports version {:?}", program, version);
            if version.is_empty() {
                None
            } else {
                Some(version)
            }
        }
        Ok(out) => {
            debug!("{} --version exited with {}", program, out.status);
            None
        }
        Err(e) => {
            debug!("{} is not runnable: {}", program, e);
            None
        }
    }
}

/// Installed Node.js version, e.g. `v20.10.0`
pub async fn check_node() -> Option<String> {
    check_runtime("node").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_has_no_version() {
        assert!(check_runtime("definitely-not-a-real-runtime-binary").await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_program_has_no_version() {
        assert!(check_runtime("false").await.is_none());
    }
}

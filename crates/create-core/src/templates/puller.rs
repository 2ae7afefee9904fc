//! Materialize a template through an external degit-style tool

use crate::error::{CreateError, Result};
use crate::product::ProductConfig;
use colored::Colorize;
use log::debug;
use tokio::process::Command as TokioCommand;

/// Runs `<program> <args...> <repository>/<template> <dir>`
#[derive(Debug, Clone)]
pub struct TemplatePuller {
    program: String,
    args: Vec<String>,
    repository: String,
}

impl TemplatePuller {
    pub fn new(program: impl Into<String>, args: Vec<String>, repository: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            repository: repository.into(),
        }
    }

    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        let (program, args) = config.fetch_tool();
        Self::new(
            program,
            args.iter().map(|a| a.to_string()).collect(),
            config.template_repository(),
        )
    }

    /// Source identifier handed to the tool
    pub fn source_for(&self, template: &str) -> String {
        format!("{}/{}", self.repository.trim_end_matches('/'), template)
    }

    /// Full argument list for a pull
    pub fn command_args(&self, template: &str, dir: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(self.source_for(template));
        args.push(dir.to_string());
        args
    }

    /// Run the tool with inherited stdio; the tool reports its own conflicts
    pub async fn pull(&self, template: &str, dir: &str) -> Result<()> {
        let args = self.command_args(template, dir);
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            self.program.yellow(),
            args.join(" ").yellow()
        );
        debug!("spawning {} {:?}", self.program, args);

        let pull_error = |reason: String| CreateError::Pull {
            template: template.to_string(),
            dir: dir.to_string(),
            reason,
        };

        let status = TokioCommand::new(&self.program)
            .args(&args)
            .status()
            .await
            .map_err(|e| pull_error(format!("failed to run {}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(pull_error(format!(
                "{} exited with code {}",
                self.program,
                status.code().unwrap_or(-1)
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args() {
        let puller = TemplatePuller::new(
            "pnpx",
            vec!["tiged".to_string()],
            "ModyQyW/create/templates/",
        );

        assert_eq!(
            puller.command_args("vue-naive", "my-app"),
            vec!["tiged", "ModyQyW/create/templates/vue-naive", "my-app"]
        );
    }

    #[test]
    fn test_empty_dir_is_passed_through() {
        let puller = TemplatePuller::new("pnpx", vec!["tiged".to_string()], "owner/repo");
        let args = puller.command_args("koa", "");
        assert_eq!(args.last().map(String::as_str), Some(""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_tool() {
        let puller = TemplatePuller::new("true", Vec::new(), "owner/repo");
        assert!(puller.pull("vue-naive", "out").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_is_pull_error() {
        let puller = TemplatePuller::new("false", Vec::new(), "owner/repo");

        let err = puller.pull("vue-naive", "out").await.unwrap_err();

        match err {
            CreateError::Pull { template, dir, .. } => {
                assert_eq!(template, "vue-naive");
                assert_eq!(dir, "out");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_tool_is_pull_error() {
        let puller = TemplatePuller::new("definitely-not-a-real-degit", Vec::new(), "owner/repo");
        let err = puller.pull("koa", "out").await.unwrap_err();
        assert!(matches!(err, CreateError::Pull { .. }));
    }
}

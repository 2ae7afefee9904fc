//! modyqyw-create - Project scaffolding from ModyQyW templates on Node.js LTS

use clap::{ArgAction, Parser};
use colored::Colorize;
use create_core::tui::CreateArgs;
use create_core::ProductConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ModyQyW product configuration
#[derive(Clone)]
pub struct ModyqywConfig;

impl ProductConfig for ModyqywConfig {
    fn name(&self) -> &'static str {
        "modyqyw-create"
    }

    fn display_name(&self) -> &'static str {
        "ModyQyW Create"
    }

    fn release_index_url_env(&self) -> &'static str {
        "MODYQYW_CREATE_NODE_INDEX_URL"
    }

    fn default_template_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/modyqyw/create/main/meta.json"
    }

    fn template_url_env(&self) -> &'static str {
        "MODYQYW_CREATE_TEMPLATE_URL"
    }

    fn no_update_check_env(&self) -> &'static str {
        "MODYQYW_CREATE_NO_UPDATE_CHECK"
    }

    fn template_repository(&self) -> &'static str {
        "ModyQyW/create/templates"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install modyqyw-create --force"
    }
}

#[derive(Parser, Debug)]
#[command(name = "modyqyw-create")]
#[command(about = "Scaffold a project from a ModyQyW template on the latest Node.js LTS")]
#[command(version, disable_version_flag = true)]
#[command(after_help = "Examples:\n  $ modyqyw-create my-app\n  $ modyqyw-create . --template vue-naive")]
pub struct Args {
    /// Directory to pull the template into (. for the current directory)
    pub directory: Option<String>,

    /// Template name to use
    #[arg(short = 'p', long)]
    pub template: Option<String>,

    /// Local directory containing meta.json instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
        }
    }
}

/// Logger filter when RUST_LOG is unset; anything noisier draws over the prompts
const DEFAULT_LOG_FILTER: &str = "error";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    // Help and version exit here, before any network access
    let args = Args::parse();
    log::debug!("{:?}", args);

    let result = create_core::run(&ModyqywConfig, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_default_log_filter_stays_quiet_under_tui() {
        assert_eq!(DEFAULT_LOG_FILTER, "error");
    }

    #[test]
    fn test_positional_directory_and_template() {
        let args = Args::try_parse_from(["modyqyw-create", "my-app", "-p", "vue-naive"]).unwrap();
        assert_eq!(args.directory.as_deref(), Some("my-app"));
        assert_eq!(args.template.as_deref(), Some("vue-naive"));
    }

    #[test]
    fn test_long_template_flag() {
        let args = Args::try_parse_from(["modyqyw-create", "--template", "koa"]).unwrap();
        assert!(args.directory.is_none());
        assert_eq!(args.template.as_deref(), Some("koa"));
    }

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["modyqyw-create"]).unwrap();
        assert!(args.directory.is_none());
        assert!(args.template.is_none());
        assert!(args.template_dir.is_none());
    }

    #[test]
    fn test_version_flags_short_circuit() {
        for flag in ["-v", "--version"] {
            let err = Args::try_parse_from(["modyqyw-create", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn test_help_flags_short_circuit() {
        for flag in ["-h", "--help"] {
            let err = Args::try_parse_from(["modyqyw-create", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn test_into_create_args() {
        let args = Args::try_parse_from(["modyqyw-create", ".", "--template-dir", "templates"]).unwrap();
        let create: CreateArgs = args.into();
        assert_eq!(create.directory.as_deref(), Some("."));
        assert_eq!(create.template_dir, Some(PathBuf::from("templates")));
    }

    #[test]
    fn test_product_urls() {
        let config = ModyqywConfig;
        assert_eq!(
            config.default_release_index_url(),
            "https://nodejs.org/dist/index.json"
        );
        assert_eq!(config.template_repository(), "ModyQyW/create/templates");
    }
}

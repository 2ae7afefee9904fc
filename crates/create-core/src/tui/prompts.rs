//! Charm-style CLI prompts using cliclack

use crate::error::{CreateError, Result};
use crate::host::SystemHost;
use crate::pipeline::{Pipeline, PipelineInput, Prompter, Step};
use crate::product::ProductConfig;
use crate::templates::fetcher::TemplateSource;
use crate::templates::manifest::TemplateCatalog;
use crate::update::UpdateCheck;
use cliclack::ProgressBar;
use std::path::PathBuf;

/// CLI arguments for a scaffolding run
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory (or file) holding `meta.json` instead of the remote manifest
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Destination directory
    pub directory: Option<String>,
}

const DIRECTORY_PROMPT: &str =
    "Project directory (. pulls into the current directory, a name creates that folder)";

/// Example hint only; an empty answer is passed to the fetch tool as-is
const DIRECTORY_PLACEHOLDER: &str = "my-app";

/// [`Prompter`] backed by cliclack spinners and prompts
#[derive(Default)]
pub struct ClackPrompter {
    spinner: Option<ProgressBar>,
}

impl ClackPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for ClackPrompter {
    fn select_template(&mut self, catalog: &TemplateCatalog) -> Result<String> {
        let mut select = cliclack::select("Select a template, ✅ marks the recommended ones");
        for template in catalog.iter() {
            select = select.item(template.name.clone(), &template.name, &template.description);
        }

        select
            .interact()
            .map_err(|_| CreateError::SelectionAborted { prompt: "Template" })
    }

    fn input_directory(&mut self) -> Result<String> {
        cliclack::input(DIRECTORY_PROMPT)
            .placeholder(DIRECTORY_PLACEHOLDER)
            .required(false)
            .interact()
            .map_err(|_| CreateError::SelectionAborted { prompt: "Directory" })
    }

    fn begin(&mut self, step: Step) {
        if step.streams_output() {
            let _ = cliclack::log::step(step.title());
            return;
        }
        let spinner = cliclack::spinner();
        spinner.start(step.title());
        self.spinner = Some(spinner);
    }

    fn done(&mut self, _step: Step, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn warn(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop("");
        }
        let _ = cliclack::log::warning(message);
    }

    fn fail(&mut self, step: Option<Step>) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(step.map_or("Failed", |step| step.failed_label()));
        }
    }
}

/// Run the pipeline with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    let _ = cliclack::intro(config.display_name());

    let update = UpdateCheck::spawn(config, cli_version);

    let host = SystemHost::from_config(config, args.template_dir.clone())?;
    if let TemplateSource::Local(path) = host.template_fetcher().source() {
        let _ = cliclack::log::info(format!("Using local templates from {}", path.display()));
    }

    let input = PipelineInput {
        template: args.template,
        directory: args.directory,
    };
    let mut pipeline = Pipeline::new(host, ClackPrompter::new());
    let result = pipeline.run(&input).await;

    if let Some(check) = update {
        if let Some(notice) = check.finish().await {
            let _ = cliclack::log::remark(notice);
        }
    }

    let ctx = result?;
    if ctx.install_error.is_some() {
        let _ = cliclack::outro("Template pulled, but Node.js LTS still needs to be installed.");
    } else {
        let _ = cliclack::outro("Happy coding!");
    }

    Ok(())
}

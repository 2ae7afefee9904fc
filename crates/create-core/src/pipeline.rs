//! The five-stage scaffolding pipeline
//!
//! Stages run strictly in order and each one finishes (or fails) before the
//! next begins:
//!
//! ```text
//! Init -> ReleasesFetched -> RuntimeReconciled -> TemplatesFetched -> TemplateSelected -> Pulled
//! ```
//!
//! Each stage hands its output straight to the next as an argument. All
//! outside effects go through [`Host`] (network, subprocesses) and
//! [`Prompter`] (user interaction), so the sequencing can be driven by fakes.

use crate::error::{CreateError, Result};
use crate::runtime::catalog::{major_version, VersionCatalog};
use crate::runtime::reconcile::{self, RuntimeAction};
use crate::templates::manifest::TemplateCatalog;
use log::{debug, info};

/// Pipeline state, advanced once per completed stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    #[default]
    Init,
    ReleasesFetched,
    RuntimeReconciled,
    TemplatesFetched,
    TemplateSelected,
    Pulled,
}

/// The unit of work currently in progress, for user-facing progress output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FetchReleases,
    CheckRuntime,
    InstallRuntime,
    FetchTemplates,
    PullTemplate,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Step::FetchReleases => "Fetching Node.js releases...",
            Step::CheckRuntime => "Checking Node.js...",
            Step::InstallRuntime => "Installing Node.js LTS...",
            Step::FetchTemplates => "Loading templates...",
            Step::PullTemplate => "Pulling template...",
        }
    }

    /// Short label for a step that ended in an error
    pub fn failed_label(&self) -> &'static str {
        match self {
            Step::FetchReleases => "Could not fetch Node.js releases",
            Step::CheckRuntime => "Could not check Node.js",
            Step::InstallRuntime => "Could not install Node.js LTS",
            Step::FetchTemplates => "Could not load templates",
            Step::PullTemplate => "Could not pull template",
        }
    }

    /// Steps whose tool streams its own output to the terminal
    pub fn streams_output(&self) -> bool {
        matches!(self, Step::InstallRuntime | Step::PullTemplate)
    }
}

/// Network and subprocess collaborators
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Download the release catalog and resolve the LTS line
    async fn fetch_releases(&self) -> Result<VersionCatalog>;

    /// Version reported by the local runtime, if it runs
    async fn node_version(&self) -> Option<String>;

    /// Install `major` and make it the default; awaited by the pipeline
    async fn install_lts(&self, major: u64, lts_version: &str) -> Result<()>;

    /// Download the template manifest
    async fn fetch_templates(&self) -> Result<TemplateCatalog>;

    /// Materialize `template` into `dir`
    async fn pull(&self, template: &str, dir: &str) -> Result<()>;
}

/// User interaction: the two prompts plus progress reporting
pub trait Prompter {
    /// Single-choice template list; returns the chosen name
    fn select_template(&mut self, catalog: &TemplateCatalog) -> Result<String>;

    /// Free-text destination directory; an empty answer is allowed
    fn input_directory(&mut self) -> Result<String>;

    fn begin(&mut self, _step: Step) {}

    fn done(&mut self, _step: Step, _message: &str) {}

    fn warn(&mut self, _message: &str) {}

    /// Close out whatever step was in progress when the run failed.
    /// The error itself is rendered once, by the caller of [`Pipeline::run`].
    fn fail(&mut self, _step: Option<Step>) {}
}

/// Command inputs to the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    /// Template name from `--template`
    pub template: Option<String>,

    /// First positional argument
    pub directory: Option<String>,
}

/// Everything a run has learned so far; each stage writes only its own fields
#[derive(Debug, Default)]
pub struct RunContext {
    pub stage: Stage,
    pub versions: Option<VersionCatalog>,
    pub lts_version: Option<String>,
    pub lts_major: Option<u64>,
    pub current_version: Option<String>,
    pub current_major: Option<u64>,
    /// Reported, non-fatal failure of the runtime install
    pub install_error: Option<CreateError>,
    pub templates: Option<TemplateCatalog>,
    pub selected_template: Option<String>,
    pub destination_dir: Option<String>,
}

impl RunContext {
    fn advance(&mut self, stage: Stage) {
        debug!("stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

/// Resolve the template name: exact `requested` match skips the prompt
///
/// Returns the name and whether the prompt was shown.
pub fn select_template<P: Prompter>(
    catalog: &TemplateCatalog,
    requested: Option<&str>,
    prompter: &mut P,
) -> Result<(String, bool)> {
    if let Some(name) = requested {
        if let Some(found) = catalog.find(name) {
            return Ok((found.name.clone(), false));
        }
        prompter.warn(&format!(
            "Template '{}' not found. Available templates: {}",
            name,
            catalog.names().join(", ")
        ));
    }

    let name = prompter.select_template(catalog)?;
    Ok((name, true))
}

/// Resolve the destination: a non-empty positional wins, else prompt
///
/// Returns the directory and whether the prompt was shown.
pub fn resolve_directory<P: Prompter>(
    positional: Option<&str>,
    prompter: &mut P,
) -> Result<(String, bool)> {
    match positional {
        Some(dir) if !dir.is_empty() => Ok((dir.to_string(), false)),
        _ => Ok((prompter.input_directory()?, true)),
    }
}

/// Completion message for the pull step; an empty `dir` is left to the fetch tool
fn pulled_message(template: &str, dir: &str) -> String {
    if dir.is_empty() {
        format!("Pulled {} (destination left to the fetch tool)", template)
    } else {
        format!("Pulled {} into {}", template, dir)
    }
}

/// Runs the stages in order against a host and a prompter
pub struct Pipeline<H, P> {
    host: H,
    prompter: P,
    /// Step begun but not yet done
    active: Option<Step>,
}

impl<H: Host, P: Prompter> Pipeline<H, P> {
    pub fn new(host: H, prompter: P) -> Self {
        Self {
            host,
            prompter,
            active: None,
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run every stage; the first fatal error ends the run
    pub async fn run(&mut self, input: &PipelineInput) -> Result<RunContext> {
        let mut ctx = RunContext::default();
        match self.run_stages(input, &mut ctx).await {
            Ok(()) => Ok(ctx),
            Err(e) => {
                debug!("run failed during {:?}: {}", self.active, e);
                self.prompter.fail(self.active.take());
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self, input: &PipelineInput, ctx: &mut RunContext) -> Result<()> {
        let versions = self.fetch_releases().await?;
        let lts_major = versions.lts_major();
        let lts_version = versions.lts_version().to_string();
        ctx.lts_major = Some(lts_major);
        ctx.lts_version = Some(lts_version.clone());
        ctx.versions = Some(versions);
        ctx.advance(Stage::ReleasesFetched);

        self.reconcile_runtime(ctx, lts_major, &lts_version).await;
        ctx.advance(Stage::RuntimeReconciled);

        let templates = self.fetch_templates().await?;
        ctx.advance(Stage::TemplatesFetched);

        let template = self.select_template(input, &templates)?;
        ctx.templates = Some(templates);
        ctx.selected_template = Some(template.clone());
        ctx.advance(Stage::TemplateSelected);

        let dir = self.resolve_directory(input)?;
        ctx.destination_dir = Some(dir.clone());
        self.pull_template(&template, &dir).await?;
        ctx.advance(Stage::Pulled);
        Ok(())
    }

    fn begin(&mut self, step: Step) {
        self.active = Some(step);
        self.prompter.begin(step);
    }

    fn done(&mut self, step: Step, message: &str) {
        self.active = None;
        self.prompter.done(step, message);
    }

    async fn fetch_releases(&mut self) -> Result<VersionCatalog> {
        self.begin(Step::FetchReleases);
        let catalog = self.host.fetch_releases().await?;

        info!(
            "Latest Node.js LTS is {} (major {})",
            catalog.lts_version(),
            catalog.lts_major()
        );
        self.done(
            Step::FetchReleases,
            &format!("Latest Node.js LTS: {}", catalog.lts_version()),
        );
        Ok(catalog)
    }

    /// Never fails: an install failure is reported once and recorded
    async fn reconcile_runtime(&mut self, ctx: &mut RunContext, lts_major: u64, lts_version: &str) {
        self.begin(Step::CheckRuntime);
        ctx.current_version = self.host.node_version().await;
        ctx.current_major = ctx.current_version.as_deref().and_then(major_version);

        match reconcile::plan(ctx.current_major, lts_major) {
            RuntimeAction::UpToDate => {
                self.done(
                    Step::CheckRuntime,
                    &format!(
                        "Node.js {} matches the LTS line",
                        ctx.current_version.as_deref().unwrap_or_default()
                    ),
                );
            }
            RuntimeAction::Install { major, reason } => {
                self.done(Step::CheckRuntime, &format!("{}, installing Node.js {}", reason, major));
                self.begin(Step::InstallRuntime);
                match self.host.install_lts(major, lts_version).await {
                    Ok(()) => {
                        self.done(Step::InstallRuntime, &format!("Node.js {} installed", major));
                    }
                    Err(e) => {
                        debug!("runtime install failed: {}", e);
                        self.active = None;
                        self.prompter.warn(&e.to_string());
                        ctx.install_error = Some(e);
                    }
                }
            }
        }
    }

    async fn fetch_templates(&mut self) -> Result<TemplateCatalog> {
        self.begin(Step::FetchTemplates);
        let catalog = self.host.fetch_templates().await?;
        self.done(Step::FetchTemplates, &format!("{} templates available", catalog.len()));
        Ok(catalog)
    }

    fn select_template(&mut self, input: &PipelineInput, catalog: &TemplateCatalog) -> Result<String> {
        let (name, prompted) = select_template(catalog, input.template.as_deref(), &mut self.prompter)?;
        debug!("selected template {} (prompted: {})", name, prompted);
        Ok(name)
    }

    fn resolve_directory(&mut self, input: &PipelineInput) -> Result<String> {
        let (dir, prompted) = resolve_directory(input.directory.as_deref(), &mut self.prompter)?;
        debug!("destination {:?} (prompted: {})", dir, prompted);
        Ok(dir)
    }

    async fn pull_template(&mut self, template: &str, dir: &str) -> Result<()> {
        self.begin(Step::PullTemplate);
        self.host.pull(template, dir).await?;
        self.done(Step::PullTemplate, &pulled_message(template, dir));
        Ok(())
    }
}

use crate::domain::model::{Category, TaskKind};
use crate::utils::error::{HubError, Result};
use crate::utils::validation::{validate_file_extensions, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "prompthub")]
#[command(about = "Batch maintenance jobs for the FreePromptHub static site")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Site checkout to operate on
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// TOML file overriding the built-in site tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Restrict category-scoped jobs to these categories (repeatable)
    #[arg(long = "category", global = true, value_parser = parse_category)]
    pub categories: Vec<Category>,

    /// Show what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Zip the original content of every changed file under <root>/.backups first
    #[arg(long, global = true)]
    pub backup: bool,

    /// Write a per-file report (.json or .csv)
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Insert the category affiliate banner before </article>
    InjectBanners,
    /// Insert the "Works Better With" product card before the footer
    InstallCards,
    /// Move the affiliate banner to the top of the page content
    MoveBanners,
    /// Create prompt pages from the [[prompts]] catalogue
    Generate {
        /// Overwrite pages that already exist
        #[arg(long)]
        force: bool,
    },
    /// Replace known-broken hop links
    FixLinks,
    /// Point every ClickBank link on a category page at the category's canonical link
    RetargetLinks,
    /// Repair href="#" related-prompt cards
    FixRelated,
    /// Turn relative asset and home links into root-absolute ones
    FixPaths,
    /// Add missing stylesheet links after <title>
    FixStylesheets,
    /// Replace old headers with the standard navigation header
    StandardizeHeaders,
    /// Remove competitor recommendation sections
    RemoveSections,
    /// Remove unsubstantiated discount claims
    ScrubClaims,
    /// Replace inflated marketing figures with factual wording
    ReplaceMarketingClaims,
    /// Install analytics and conversion tracking
    SetupAnalytics {
        /// Also write analytics-dashboard.html at the site root
        #[arg(long)]
        dashboard: bool,
    },
    /// Add security meta tags after the viewport meta
    AddSecurityHeaders,
    /// Link the sitemap and feeds from the footer of the main pages
    AddFeedLinks,
    /// Add the cookie consent banner
    AddCookieConsent,
    /// Add a copy button above the prompt text of category pages
    AddCopyButton,
    /// Run the task list from the [run] table of the config file
    Run,
}

impl Command {
    /// The job a subcommand stands for; `None` for `run`, which stands for several.
    pub fn task_kind(&self) -> Option<TaskKind> {
        match self {
            Command::InjectBanners => Some(TaskKind::InjectBanners),
            Command::InstallCards => Some(TaskKind::InstallCards),
            Command::MoveBanners => Some(TaskKind::MoveBanners),
            Command::Generate { .. } => Some(TaskKind::Generate),
            Command::FixLinks => Some(TaskKind::FixLinks),
            Command::RetargetLinks => Some(TaskKind::RetargetLinks),
            Command::FixRelated => Some(TaskKind::FixRelated),
            Command::FixPaths => Some(TaskKind::FixPaths),
            Command::FixStylesheets => Some(TaskKind::FixStylesheets),
            Command::StandardizeHeaders => Some(TaskKind::StandardizeHeaders),
            Command::RemoveSections => Some(TaskKind::RemoveSections),
            Command::ScrubClaims => Some(TaskKind::ScrubClaims),
            Command::ReplaceMarketingClaims => Some(TaskKind::ReplaceMarketingClaims),
            Command::SetupAnalytics { .. } => Some(TaskKind::SetupAnalytics),
            Command::AddSecurityHeaders => Some(TaskKind::AddSecurityHeaders),
            Command::AddFeedLinks => Some(TaskKind::AddFeedLinks),
            Command::AddCookieConsent => Some(TaskKind::AddCookieConsent),
            Command::AddCopyButton => Some(TaskKind::AddCopyButton),
            Command::Run => None,
        }
    }
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    value.parse::<Category>().map_err(|e| e.to_string())
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        if !self.global.root.is_dir() {
            return Err(HubError::InvalidConfigValueError {
                field: "--root".to_string(),
                value: self.global.root.display().to_string(),
                reason: "Not a directory".to_string(),
            });
        }

        if let Some(report) = &self.global.report {
            validate_file_extensions(
                "--report",
                &[report.to_string_lossy().to_string()],
                &["json", "csv"],
            )?;
        }

        if matches!(self.command, Command::Run) && self.global.config.is_none() {
            return Err(HubError::MissingConfigError {
                field: "--config (the run command reads its task list from [run])".to_string(),
            });
        }

        Ok(())
    }
}

pub mod affiliates;
pub mod analytics;
pub mod cleanup;
pub mod copy_button;
pub mod generator;
pub mod housekeeping;
pub mod links;
pub mod site_meta;

pub use affiliates::{InjectBanners, InstallCards, MoveBanners};
pub use analytics::SetupAnalytics;
pub use cleanup::{RemoveSections, ScrubClaims};
pub use copy_button::CopyButton;
pub use generator::PromptPageRenderer;
pub use housekeeping::{FixPaths, FixStylesheets, StandardizeHeaders};
pub use links::{FixLinks, FixRelated, RetargetLinks};
pub use site_meta::{CookieConsent, FeedLinks, SecurityHeaders};

use crate::config::SiteConfig;
use crate::core::discovery;
use crate::core::engine::RewriteEngine;
use crate::domain::model::{BatchReport, Category, FileStatus, PageTarget, TaskKind};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// What a task run needs besides the engine.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub config: SiteConfig,
    pub root: PathBuf,
    /// Empty means every category.
    pub categories: Vec<Category>,
    /// `generate`: overwrite existing pages.
    pub force: bool,
    /// `setup-analytics`: also write the dashboard page.
    pub dashboard: bool,
}

impl TaskContext {
    pub fn new(config: SiteConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            categories: Vec::new(),
            force: false,
            dashboard: false,
        }
    }

    pub fn selected_categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            self.categories.clone()
        }
    }

    fn category_targets(&self) -> Result<Vec<PageTarget>> {
        discovery::category_pages(&self.root, &self.config.site.prompts_dir, &self.selected_categories())
    }

    /// Named root-relative pages that exist, narrowed to the selected categories when some were named.
    fn listed_targets(&self, pages: &[String]) -> Vec<PageTarget> {
        let mut targets: Vec<PageTarget> = pages
            .iter()
            .filter(|page| {
                let exists = self.root.join(page.as_str()).is_file();
                if !exists {
                    tracing::warn!("⚠️ Listed page doesn't exist: {}", page);
                }
                exists
            })
            .map(|page| {
                let category = discovery::category_of(Path::new(page), &self.config.site.prompts_dir);
                PageTarget::new(page.as_str(), category)
            })
            .filter(|t| {
                self.categories.is_empty() || t.category.map(|c| self.categories.contains(&c)).unwrap_or(false)
            })
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// The whole tree, narrowed to the selected categories when some were named.
    fn tree_targets(&self) -> Result<Vec<PageTarget>> {
        let targets = discovery::tree_pages(&self.root, &self.config.site.prompts_dir, &self.config.site.skip_dirs)?;
        if self.categories.is_empty() {
            return Ok(targets);
        }
        Ok(targets
            .into_iter()
            .filter(|t| t.category.map(|c| self.categories.contains(&c)).unwrap_or(false))
            .collect())
    }
}

/// Run one task over its pages.
pub async fn execute<S: Storage>(kind: TaskKind, ctx: &TaskContext, engine: &RewriteEngine<S>) -> Result<BatchReport> {
    let config = &ctx.config;
    tracing::info!("📋 Task: {}", kind);

    match kind {
        TaskKind::InjectBanners => {
            engine
                .run(&InjectBanners::from_config(config)?, &ctx.category_targets()?)
                .await
        }
        TaskKind::InstallCards => {
            let task = InstallCards::from_config(config)?;
            let report = engine.run(&task, &ctx.category_targets()?).await?;

            let value: f64 = report
                .files
                .iter()
                .filter(|f| f.status == FileStatus::Updated)
                .filter_map(|f| f.category.and_then(|c| task.product(c)))
                .map(|p| p.price_value())
                .sum();
            if report.count(FileStatus::Updated) > 0 {
                tracing::info!("💰 Potential value: ${:.2} at one sale per page", value);
            }
            Ok(report)
        }
        TaskKind::MoveBanners => engine.run(&MoveBanners, &ctx.category_targets()?).await,
        TaskKind::Generate => {
            let pages = generator::render_catalogue(config, &ctx.selected_categories())?;
            engine.publish(kind.name(), pages, ctx.force).await
        }
        TaskKind::FixLinks => engine.run(&FixLinks::from_config(config), &ctx.tree_targets()?).await,
        TaskKind::RetargetLinks => {
            engine
                .run(&RetargetLinks::from_config(config), &ctx.category_targets()?)
                .await
        }
        TaskKind::FixRelated => engine.run(&FixRelated::from_config(config), &ctx.tree_targets()?).await,
        TaskKind::FixPaths => engine.run(&FixPaths::from_config(config)?, &ctx.tree_targets()?).await,
        TaskKind::FixStylesheets => {
            engine
                .run(&FixStylesheets::from_config(config)?, &ctx.tree_targets()?)
                .await
        }
        TaskKind::StandardizeHeaders => {
            engine
                .run(&StandardizeHeaders::from_config(config)?, &ctx.tree_targets()?)
                .await
        }
        TaskKind::RemoveSections => {
            engine
                .run(&RemoveSections::from_config(config)?, &ctx.tree_targets()?)
                .await
        }
        TaskKind::ScrubClaims => engine.run(&ScrubClaims::from_config(config), &ctx.tree_targets()?).await,
        TaskKind::ReplaceMarketingClaims => {
            engine
                .run(&ScrubClaims::marketing(config), &ctx.tree_targets()?)
                .await
        }
        TaskKind::SetupAnalytics => {
            let task = SetupAnalytics::from_config(config)?;
            let mut report = engine.run(&task, &ctx.tree_targets()?).await?;
            if ctx.dashboard {
                let page = analytics::dashboard_page(config)?;
                report.merge(engine.publish(kind.name(), vec![page], true).await?);
            }
            Ok(report)
        }
        TaskKind::AddSecurityHeaders => engine.run(&SecurityHeaders, &ctx.tree_targets()?).await,
        TaskKind::AddFeedLinks => {
            engine
                .run(&FeedLinks::from_config(config)?, &ctx.listed_targets(&config.feeds.pages))
                .await
        }
        TaskKind::AddCookieConsent => {
            engine
                .run(&CookieConsent::from_config(config)?, &ctx.tree_targets()?)
                .await
        }
        TaskKind::AddCopyButton => engine.run(&CopyButton, &ctx.category_targets()?).await,
    }
}

/// Run several tasks in order. Each task sees the previous tasks' writes.
pub async fn execute_all<S: Storage>(
    kinds: &[TaskKind],
    ctx: &TaskContext,
    engine: &RewriteEngine<S>,
) -> Result<Vec<BatchReport>> {
    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        reports.push(execute(*kind, ctx, engine).await?);
    }
    Ok(reports)
}

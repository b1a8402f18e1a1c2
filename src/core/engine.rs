use crate::core::backup;
use crate::domain::model::{
    BatchReport, FileReport, FileStatus, GeneratedPage, Page, PageTarget, RewriteOutcome,
};
use crate::domain::ports::{Rewrite, Storage};
use crate::utils::error::{HubError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Compute and report every change without writing anything.
    pub dry_run: bool,
    /// Zip the original content of changed files before overwriting them.
    pub backup: bool,
}

/// A write that is waiting for the whole batch to be computed.
struct PendingWrite {
    report_index: usize,
    path: PathBuf,
    original: Option<String>,
    content: String,
}

pub struct RewriteEngine<S: Storage> {
    storage: S,
    options: EngineOptions,
}

impl<S: Storage> RewriteEngine<S> {
    pub fn new(storage: S, options: EngineOptions) -> Self {
        Self { storage, options }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Apply `task` to every target, one file after another.
    ///
    /// Failures on one file are recorded and the batch moves on. Pages whose pattern
    /// is missing are left byte-for-byte untouched.
    pub async fn run<R: Rewrite + ?Sized>(&self, task: &R, targets: &[PageTarget]) -> Result<BatchReport> {
        tracing::info!("🚀 {}: checking {} files", task.name(), targets.len());

        let mut report = BatchReport::new(task.name(), self.options.dry_run);
        let mut pending = Vec::new();

        for target in targets {
            let page = match self.load_page(target).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("  ✗ Error reading {}: {}", target.path.display(), e);
                    report.files.push(file_report(target, FileStatus::Failed, e.to_string()));
                    continue;
                }
            };

            let outcome = match task.rewrite(&page) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("  ✗ Error processing {}: {}", target.path.display(), e);
                    report.files.push(file_report(target, FileStatus::Failed, e.to_string()));
                    continue;
                }
            };

            match outcome {
                RewriteOutcome::Updated { content, .. } if content == page.content => {
                    tracing::debug!("  - {} (no changes needed)", target.file_name());
                    report
                        .files
                        .push(file_report(target, FileStatus::Skipped, "no changes needed"));
                }
                RewriteOutcome::Updated { content, notes } => {
                    tracing::info!("  ✓ {}", target.path.display());
                    for note in &notes {
                        tracing::debug!("    {}", note);
                    }
                    pending.push(PendingWrite {
                        report_index: report.files.len(),
                        path: target.path.clone(),
                        original: Some(page.content),
                        content,
                    });
                    report
                        .files
                        .push(file_report(target, FileStatus::Updated, notes.join("; ")));
                }
                RewriteOutcome::Unchanged { reason } => {
                    tracing::debug!("  ⏭️ {} ({})", target.file_name(), reason);
                    report.files.push(file_report(target, FileStatus::Skipped, reason));
                }
                RewriteOutcome::PatternNotFound { pattern } => {
                    tracing::warn!("  ⚠️ Pattern not found in {}: {}", target.path.display(), pattern);
                    report.files.push(file_report(
                        target,
                        FileStatus::PatternNotFound,
                        format!("pattern not found: {}", pattern),
                    ));
                }
            }
        }

        self.commit(task.name(), &mut report, pending).await?;
        log_summary(&report);
        Ok(report)
    }

    /// Write freshly generated pages. Existing files are skipped unless `overwrite`.
    pub async fn publish(&self, task_name: &str, pages: Vec<GeneratedPage>, overwrite: bool) -> Result<BatchReport> {
        tracing::info!("🚀 {}: {} pages to create", task_name, pages.len());

        let mut report = BatchReport::new(task_name, self.options.dry_run);
        let mut pending = Vec::new();

        for page in pages {
            let target = page.target;
            let original = if self.storage.exists(&target.path).await {
                if !overwrite {
                    tracing::info!("  ⏭️ {} already exists", target.path.display());
                    report
                        .files
                        .push(file_report(&target, FileStatus::Skipped, "already exists"));
                    continue;
                }
                match self.load_page(&target).await {
                    Ok(existing) if existing.content == page.content => {
                        report
                            .files
                            .push(file_report(&target, FileStatus::Skipped, "no changes needed"));
                        continue;
                    }
                    Ok(existing) => Some(existing.content),
                    Err(e) => {
                        report.files.push(file_report(&target, FileStatus::Failed, e.to_string()));
                        continue;
                    }
                }
            } else {
                None
            };

            let status = if original.is_some() {
                FileStatus::Updated
            } else {
                FileStatus::Created
            };
            tracing::info!("  ✅ {} {}", status, target.path.display());
            pending.push(PendingWrite {
                report_index: report.files.len(),
                path: target.path.clone(),
                original,
                content: page.content,
            });
            report.files.push(file_report(&target, status, ""));
        }

        self.commit(task_name, &mut report, pending).await?;
        log_summary(&report);
        Ok(report)
    }

    async fn load_page(&self, target: &PageTarget) -> Result<Page> {
        let bytes = self.storage.read_file(&target.path).await?;
        let content = String::from_utf8(bytes).map_err(|_| HubError::EncodingError {
            path: target.path.display().to_string(),
        })?;
        Ok(Page {
            target: target.clone(),
            content,
        })
    }

    async fn commit(&self, task_name: &str, report: &mut BatchReport, pending: Vec<PendingWrite>) -> Result<()> {
        if pending.is_empty() {
            return Ok(());
        }

        if self.options.dry_run {
            tracing::info!("🔍 DRY RUN: {} files would change, nothing written", pending.len());
            return Ok(());
        }

        if self.options.backup {
            let originals: Vec<(PathBuf, String)> = pending
                .iter()
                .filter_map(|w| w.original.clone().map(|o| (w.path.clone(), o)))
                .collect();
            if !originals.is_empty() {
                let archive = backup::archive(&self.storage, task_name, &originals).await?;
                tracing::info!("💾 Backup saved to {}", archive.display());
                report.backup = Some(archive.display().to_string());
            }
        }

        for write in pending {
            if let Err(e) = self.storage.write_file(&write.path, write.content.as_bytes()).await {
                tracing::error!("  ✗ Error writing {}: {}", write.path.display(), e);
                if let Some(entry) = report.files.get_mut(write.report_index) {
                    entry.status = FileStatus::Failed;
                    entry.detail = e.to_string();
                }
            }
        }

        Ok(())
    }
}

fn file_report(target: &PageTarget, status: FileStatus, detail: impl Into<String>) -> FileReport {
    FileReport {
        path: target.path.to_string_lossy().replace('\\', "/"),
        category: target.category,
        status,
        detail: detail.into(),
    }
}

fn log_summary(report: &BatchReport) {
    tracing::info!(
        "✅ {}: {} changed, {} skipped, {} pattern not found, {} failed{}",
        report.task,
        report.changed(),
        report.count(FileStatus::Skipped),
        report.count(FileStatus::PatternNotFound),
        report.count(FileStatus::Failed),
        if report.dry_run { " (dry run)" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use crate::domain::model::Category;
    use std::fs;
    use tempfile::TempDir;

    struct AppendFooter;

    impl Rewrite for AppendFooter {
        fn name(&self) -> &'static str {
            "append-footer"
        }

        fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
            if page.content.contains("<footer>") {
                return Ok(RewriteOutcome::unchanged("already has footer"));
            }
            match page.content.find("</body>") {
                Some(pos) => Ok(RewriteOutcome::updated(crate::utils::html::insert_at(
                    &page.content,
                    pos,
                    "<footer></footer>",
                ))),
                None => Ok(RewriteOutcome::not_found("</body>")),
            }
        }
    }

    fn setup(files: &[(&str, &str)]) -> (TempDir, Vec<PageTarget>) {
        let temp_dir = TempDir::new().unwrap();
        let mut targets = Vec::new();
        for (path, content) in files {
            let full = temp_dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
            targets.push(PageTarget::new(*path, Some(Category::Money)));
        }
        (temp_dir, targets)
    }

    #[tokio::test]
    async fn test_run_updates_skips_and_leaves_missing_patterns_alone() {
        let (temp_dir, targets) = setup(&[
            ("a.html", "<body></body>"),
            ("b.html", "<body><footer></footer></body>"),
            ("c.html", "<div>fragment</div>"),
        ]);
        let engine = RewriteEngine::new(LocalStorage::new(temp_dir.path()), EngineOptions::default());

        let report = engine.run(&AppendFooter, &targets).await.unwrap();

        assert_eq!(report.count(FileStatus::Updated), 1);
        assert_eq!(report.count(FileStatus::Skipped), 1);
        assert_eq!(report.count(FileStatus::PatternNotFound), 1);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("a.html")).unwrap(),
            "<body><footer></footer></body>"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("c.html")).unwrap(),
            "<div>fragment</div>"
        );
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (temp_dir, targets) = setup(&[("a.html", "<body></body>")]);
        let options = EngineOptions {
            dry_run: true,
            backup: true,
        };
        let engine = RewriteEngine::new(LocalStorage::new(temp_dir.path()), options);

        let report = engine.run(&AppendFooter, &targets).await.unwrap();

        assert_eq!(report.changed(), 1);
        assert!(report.backup.is_none());
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.html")).unwrap(), "<body></body>");
        assert!(!temp_dir.path().join(backup::BACKUP_DIR).exists());
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let (temp_dir, mut targets) = setup(&[("b.html", "<body></body>")]);
        targets.insert(0, PageTarget::new("missing.html", None));
        fs::write(temp_dir.path().join("latin1.html"), [0xff, 0xfe, 0x3c]).unwrap();
        targets.push(PageTarget::new("latin1.html", None));
        let engine = RewriteEngine::new(LocalStorage::new(temp_dir.path()), EngineOptions::default());

        let report = engine.run(&AppendFooter, &targets).await.unwrap();

        assert_eq!(report.count(FileStatus::Failed), 2);
        assert_eq!(report.count(FileStatus::Updated), 1);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_backup_written_before_changes() {
        let (temp_dir, targets) = setup(&[("a.html", "<body></body>")]);
        let options = EngineOptions {
            dry_run: false,
            backup: true,
        };
        let engine = RewriteEngine::new(LocalStorage::new(temp_dir.path()), options);

        let report = engine.run(&AppendFooter, &targets).await.unwrap();

        let backup_path = report.backup.expect("backup recorded");
        assert!(temp_dir.path().join(backup_path).exists());
    }

    #[tokio::test]
    async fn test_publish_does_not_overwrite_without_flag() {
        let (temp_dir, _) = setup(&[("prompts/money/existing.html", "old")]);
        let engine = RewriteEngine::new(LocalStorage::new(temp_dir.path()), EngineOptions::default());
        let pages = vec![
            GeneratedPage {
                target: PageTarget::new("prompts/money/existing.html", Some(Category::Money)),
                content: "new".to_string(),
            },
            GeneratedPage {
                target: PageTarget::new("prompts/money/fresh.html", Some(Category::Money)),
                content: "fresh".to_string(),
            },
        ];

        let report = engine.publish("generate", pages, false).await.unwrap();

        assert_eq!(report.count(FileStatus::Created), 1);
        assert_eq!(report.count(FileStatus::Skipped), 1);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("prompts/money/existing.html")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("prompts/money/fresh.html")).unwrap(),
            "fresh"
        );
    }
}

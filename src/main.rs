use clap::Parser;
use prompthub_tools::config::{Cli, Command};
use prompthub_tools::core::report::write_report;
use prompthub_tools::utils::error::FAILED_FILES_EXIT_CODE;
use prompthub_tools::utils::{logger, validation::Validate};
use prompthub_tools::{
    execute_all, EngineOptions, FileStatus, HubError, LocalStorage, RewriteEngine, SiteConfig,
    TaskContext,
};

fn exit_with(e: &HubError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

fn load_config(cli: &Cli) -> prompthub_tools::Result<SiteConfig> {
    let config = match &cli.global.config {
        Some(path) => {
            tracing::info!("📄 Loading site config from {}", path.display());
            SiteConfig::from_file(path)?
        }
        None => SiteConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.global.json_logs {
        logger::init_json_logger(cli.global.verbose);
    } else {
        logger::init_cli_logger(cli.global.verbose);
    }
    tracing::debug!("CLI: {:?}", cli);

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let kinds = match cli.command.task_kind() {
        Some(kind) => vec![kind],
        None if config.run.tasks.is_empty() => exit_with(&HubError::MissingConfigError {
            field: "run.tasks".to_string(),
        }),
        None => config.run.tasks.clone(),
    };

    let mut ctx = TaskContext::new(config, cli.global.root.clone());
    ctx.categories = cli.global.categories.clone();
    if let Command::Generate { force } = cli.command {
        ctx.force = force;
    }
    if let Command::SetupAnalytics { dashboard } = cli.command {
        ctx.dashboard = dashboard;
    }

    let options = EngineOptions {
        dry_run: cli.global.dry_run,
        backup: cli.global.backup,
    };
    if options.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be modified");
    }
    let engine = RewriteEngine::new(LocalStorage::new(cli.global.root.clone()), options);

    let reports = match execute_all(&kinds, &ctx, &engine).await {
        Ok(reports) => reports,
        Err(e) => exit_with(&e),
    };

    if let Some(path) = &cli.global.report {
        if let Err(e) = write_report(path, &reports) {
            exit_with(&e);
        }
        tracing::info!("📊 Report written to {}", path.display());
    }

    for report in &reports {
        println!(
            "{}: {} changed, {} skipped, {} pattern not found, {} failed{}",
            report.task,
            report.changed(),
            report.count(FileStatus::Skipped),
            report.count(FileStatus::PatternNotFound),
            report.count(FileStatus::Failed),
            if report.dry_run { " (dry run)" } else { "" }
        );
    }

    if reports.iter().any(|r| r.has_failures()) {
        eprintln!("⚠️ Some files could not be processed; see the log above");
        std::process::exit(FAILED_FILES_EXIT_CODE);
    }

    Ok(())
}

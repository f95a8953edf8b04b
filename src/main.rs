use clap::Parser;
use profile_etl::core::ConfigProvider;
use profile_etl::utils::{logger, validation::Validate};
use profile_etl::{
    CliConfig, DataUpdater, EtlEngine, LocalStorage, ManifestOutcome, ManifestUpdater, RunConfig,
    RunSummary,
};
use std::path::Path;

const RULE: &str = "============================================================";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    display_config_summary(&config);

    let storage = LocalStorage::default();
    let languages = config.languages().to_vec();
    let category_slug = config.category_slug();
    let manifest = config.manifest().map(Path::to_path_buf);
    let dry_run = config.dry_run();

    let updater = DataUpdater::new(storage.clone(), config);
    let mut engine = EtlEngine::new(updater, category_slug).with_dry_run(dry_run);
    if let Some(path) = manifest {
        engine = engine.with_manifest(ManifestUpdater::new(storage, path));
    }

    let summary = engine.run(&languages).await;
    display_run_summary(&summary, dry_run);

    std::process::exit(summary.exit_code());
}

fn display_config_summary(config: &RunConfig) {
    tracing::info!("{}", RULE);
    tracing::info!("Markdown to JSON Converter");
    tracing::info!("{}", RULE);
    tracing::info!("Category: {}", config.category);
    tracing::info!("ID Prefix: {}", config.id_prefix);
    tracing::info!("Markdown Dir: {}", config.markdown_dir.display());
    tracing::info!("JSON Dir: {}", config.json_dir.display());
    tracing::info!("Start ID: {} ({:?})", config.start_id, config.id_strategy);
    tracing::info!("Languages: {}", config.languages.join(", "));
    if let Some(manifest) = &config.manifest {
        tracing::info!("Manifest: {}", manifest.display());
    }
    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
    }
    tracing::info!("{}", RULE);
}

fn display_run_summary(summary: &RunSummary, dry_run: bool) {
    tracing::info!("{}", RULE);
    tracing::info!("SUMMARY");
    tracing::info!("{}", RULE);

    let verb = if dry_run { "would be added" } else { "added" };
    for result in &summary.results {
        let status = if result.added > 0 { "✓" } else { "✗" };
        match &result.error {
            Some(error) => tracing::info!("{} {}: 0 profiles {} ({})", status, result.language, verb, error),
            None => tracing::info!("{} {}: {} profiles {}", status, result.language, result.added, verb),
        }
    }
    tracing::info!("Total profiles {}: {}", verb, summary.total_added());

    match &summary.manifest {
        ManifestOutcome::NotRequested | ManifestOutcome::Skipped => {}
        ManifestOutcome::Missing => tracing::info!("Manifest: not found, skipped"),
        ManifestOutcome::CategoryNotFound => {
            tracing::info!("Manifest: category not listed, left unchanged")
        }
        ManifestOutcome::Updated { locales } => {
            tracing::info!("Manifest: {} locale counts updated", locales)
        }
        ManifestOutcome::Failed { message } => tracing::info!("Manifest: failed ({})", message),
    }

    tracing::info!("{}", RULE);
    if summary.exit_code() == 0 {
        tracing::info!("✓ Process completed successfully");
    } else {
        tracing::info!("✗ No profiles were added");
    }
    tracing::info!("{}", RULE);
}

use crate::core::manifest::ManifestUpdater;
use crate::domain::model::{ManifestOutcome, RunSummary};
use crate::domain::ports::{LanguagePipeline, Storage};

/// Runs every language through the pipeline, then refreshes the manifest.
pub struct EtlEngine<P: LanguagePipeline, S: Storage> {
    pipeline: P,
    manifest: Option<ManifestUpdater<S>>,
    category_slug: String,
    dry_run: bool,
}

impl<P: LanguagePipeline, S: Storage> EtlEngine<P, S> {
    pub fn new(pipeline: P, category_slug: impl Into<String>) -> Self {
        Self {
            pipeline,
            manifest: None,
            category_slug: category_slug.into(),
            dry_run: false,
        }
    }

    pub fn with_manifest(mut self, manifest: ManifestUpdater<S>) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, languages: &[String]) -> RunSummary {
        let results = self.pipeline.update_all_languages(languages).await;
        let manifest = self.update_manifest(languages).await;

        RunSummary { results, manifest }
    }

    /// Manifest failures are logged and never change the run's outcome.
    async fn update_manifest(&self, languages: &[String]) -> ManifestOutcome {
        let Some(manifest) = &self.manifest else {
            return ManifestOutcome::NotRequested;
        };

        if self.dry_run {
            tracing::info!("🔍 Dry run: manifest {} not updated", manifest.path().display());
            return ManifestOutcome::Skipped;
        }

        if !manifest.exists().await {
            tracing::warn!(
                "Manifest {} does not exist, skipping",
                manifest.path().display()
            );
            return ManifestOutcome::Missing;
        }

        tracing::info!("Updating manifest {}...", manifest.path().display());
        match manifest
            .update(&self.pipeline, &self.category_slug, languages)
            .await
        {
            Ok(outcome @ ManifestOutcome::Updated { .. }) => {
                tracing::info!("✓ Manifest updated successfully");
                outcome
            }
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("❌ Error updating manifest: {}", e);
                ManifestOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

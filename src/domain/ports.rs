use crate::domain::model::{IdStrategy, LanguageResult, MetadataDefaults};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Replaces the whole file; readers never observe a partially written file.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn category(&self) -> &str;
    fn id_prefix(&self) -> &str;
    fn markdown_dir(&self) -> &Path;
    fn json_dir(&self) -> &Path;
    fn start_id(&self) -> u32;
    fn languages(&self) -> &[String];
    fn manifest(&self) -> Option<&Path>;
    fn id_strategy(&self) -> IdStrategy;
    fn metadata(&self) -> &MetadataDefaults;
    fn expected_clues(&self) -> usize;
    fn dry_run(&self) -> bool;

    /// Lowercased category, used for file names and manifest slugs.
    fn category_slug(&self) -> String {
        self.category().to_lowercase()
    }
}

/// Per-language processing, as driven by the engine.
#[async_trait]
pub trait LanguagePipeline: Send + Sync {
    /// Returns the number of profiles added for `language`.
    async fn update_language(&self, language: &str) -> Result<usize>;

    /// Current number of profiles in the dataset for `language`.
    async fn profile_total(&self, language: &str) -> Result<usize>;

    fn dataset_path(&self, language: &str) -> PathBuf;

    /// Failures are isolated per language: logged, counted as zero, and the
    /// remaining languages still run.
    async fn update_all_languages(&self, languages: &[String]) -> Vec<LanguageResult> {
        let mut results = Vec::with_capacity(languages.len());

        for language in languages {
            match self.update_language(language).await {
                Ok(count) => results.push(LanguageResult::ok(language, count)),
                Err(e) => {
                    tracing::error!(
                        "❌ Error processing {}: {} (Category: {:?})",
                        language,
                        e,
                        e.category()
                    );
                    tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
                    results.push(LanguageResult::failed(language, &e));
                }
            }
        }

        results
    }
}

/// Domain events worth surfacing to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    UnparsableTitle {
        line: String,
    },
    ClueCountMismatch {
        title: String,
        found: usize,
        expected: usize,
    },
    NoProfilesFound {
        path: PathBuf,
    },
    DuplicateId {
        id: String,
        language: String,
    },
    ValidationFailed {
        path: PathBuf,
        reason: String,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: RunEvent);
}

use crate::core::dataset::LanguageDataset;
use crate::core::parser::MarkdownParser;
use crate::core::profile::{IdAllocator, ProfileGenerator};
use crate::domain::model::{MarkdownSection, Profile};
use crate::domain::ports::{ConfigProvider, LanguagePipeline, Reporter, RunEvent, Storage};
use crate::utils::error::{EtlError, Result};
use crate::utils::logger::TracingReporter;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DATASET_FILE_NAME: &str = "data-1.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    /// `{category}`
    Bare,
    /// `{category}_{language}`
    Underscore,
    /// `{category}-{language}`
    Hyphen,
}

/// One way of naming a markdown input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownCandidate {
    pub pattern: NamePattern,
    /// Adds `_md` before the extension, as some exports do.
    pub md_suffix: bool,
}

impl MarkdownCandidate {
    pub fn file_name(&self, category_slug: &str, language: &str) -> String {
        let stem = match self.pattern {
            NamePattern::Bare => category_slug.to_string(),
            NamePattern::Underscore => format!("{}_{}", category_slug, language),
            NamePattern::Hyphen => format!("{}-{}", category_slug, language),
        };
        if self.md_suffix {
            format!("{}_md.md", stem)
        } else {
            format!("{}.md", stem)
        }
    }
}

/// Tried in order, first existing file wins.
pub const MARKDOWN_CANDIDATES: [MarkdownCandidate; 6] = [
    MarkdownCandidate { pattern: NamePattern::Bare, md_suffix: false },
    MarkdownCandidate { pattern: NamePattern::Bare, md_suffix: true },
    MarkdownCandidate { pattern: NamePattern::Underscore, md_suffix: false },
    MarkdownCandidate { pattern: NamePattern::Underscore, md_suffix: true },
    MarkdownCandidate { pattern: NamePattern::Hyphen, md_suffix: false },
    MarkdownCandidate { pattern: NamePattern::Hyphen, md_suffix: true },
];

/// Parses a language's markdown and merges the resulting profiles into its dataset.
pub struct DataUpdater<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    reporter: Arc<dyn Reporter>,
}

impl<S: Storage, C: ConfigProvider> DataUpdater<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_reporter(storage, config, Arc::new(TracingReporter))
    }

    pub fn with_reporter(storage: S, config: C, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            storage,
            config,
            reporter,
        }
    }

    pub async fn get_markdown_file(&self, language: &str) -> Result<PathBuf> {
        let slug = self.config.category_slug();

        for candidate in MARKDOWN_CANDIDATES.iter() {
            let path = self
                .config
                .markdown_dir()
                .join(candidate.file_name(&slug, language));
            if self.storage.exists(&path).await {
                return Ok(path);
            }
            tracing::trace!("No markdown at {}", path.display());
        }

        Err(EtlError::MarkdownNotFound {
            language: language.to_string(),
            dir: self.config.markdown_dir().to_path_buf(),
        })
    }

    pub fn get_json_file(&self, language: &str) -> PathBuf {
        self.config
            .json_dir()
            .join(self.config.category_slug())
            .join(language)
            .join(DATASET_FILE_NAME)
    }

    pub async fn extract(&self, language: &str) -> Result<(PathBuf, Vec<MarkdownSection>)> {
        let markdown_file = self.get_markdown_file(language).await?;
        tracing::info!("  Reading: {}", markdown_file.display());

        let parser = MarkdownParser::new(self.reporter.as_ref())
            .with_expected_clues(self.config.expected_clues());
        let sections = parser.parse_md_file(&self.storage, &markdown_file).await?;

        Ok((markdown_file, sections))
    }

    pub fn transform(
        &self,
        language: &str,
        sections: Vec<MarkdownSection>,
        dataset: &LanguageDataset,
    ) -> Vec<Profile> {
        let mut ids = IdAllocator::for_dataset(
            self.config.id_prefix(),
            self.config.start_id(),
            self.config.id_strategy(),
            dataset.profile_ids(),
        );

        let profiles = ProfileGenerator::from_sections(
            sections,
            &mut ids,
            language,
            self.config.category(),
            self.config.metadata(),
        );

        for profile in profiles.iter().filter(|p| dataset.contains_id(&p.id)) {
            self.reporter.report(RunEvent::DuplicateId {
                id: profile.id.clone(),
                language: language.to_string(),
            });
        }

        profiles
    }

    /// Appends and persists, then reloads the written file to confirm it
    /// still holds a dataset. A file that fails the reload counts as zero.
    pub async fn load(
        &self,
        json_file: &Path,
        mut dataset: LanguageDataset,
        profiles: Vec<Profile>,
    ) -> Result<usize> {
        dataset.append(&profiles)?;
        let bytes = dataset.to_json_bytes()?;

        if self.config.dry_run() {
            tracing::info!(
                "  Dry run: would write {} profiles to {}",
                profiles.len(),
                json_file.display()
            );
            return Ok(profiles.len());
        }

        tracing::info!(
            "  Writing {} profiles to {}",
            profiles.len(),
            json_file.display()
        );
        self.storage.write_file(json_file, &bytes).await?;

        match LanguageDataset::load(&self.storage, json_file).await {
            Ok(_) => Ok(profiles.len()),
            Err(e @ (EtlError::JsonError { .. } | EtlError::InvalidDataset { .. })) => {
                self.reporter.report(RunEvent::ValidationFailed {
                    path: json_file.to_path_buf(),
                    reason: e.to_string(),
                });
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> LanguagePipeline for DataUpdater<S, C> {
    async fn update_language(&self, language: &str) -> Result<usize> {
        tracing::info!("Processing {}...", language);

        let (markdown_file, sections) = self.extract(language).await?;
        if sections.is_empty() {
            self.reporter.report(RunEvent::NoProfilesFound {
                path: markdown_file,
            });
            return Ok(0);
        }
        tracing::info!("  Found {} profiles", sections.len());

        let json_file = self.get_json_file(language);
        tracing::info!("  Loading: {}", json_file.display());
        let dataset = LanguageDataset::load(&self.storage, &json_file).await?;

        let profiles = self.transform(language, sections, &dataset);
        if let (Some(first), Some(last)) = (profiles.first(), profiles.last()) {
            tracing::debug!("  Assigned ids {} .. {}", first.id, last.id);
        }

        let added = self.load(&json_file, dataset, profiles).await?;
        if added > 0 {
            tracing::info!("  ✓ Successfully added {} profiles", added);
        }
        Ok(added)
    }

    async fn profile_total(&self, language: &str) -> Result<usize> {
        let dataset = LanguageDataset::load(&self.storage, &self.get_json_file(language)).await?;
        Ok(dataset.profile_count())
    }

    fn dataset_path(&self, language: &str) -> PathBuf {
        self.get_json_file(language)
    }
}

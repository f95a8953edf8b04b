#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{IdStrategy, MetadataDefaults, EXPECTED_CLUES};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_LANGUAGES: [&str; 3] = ["en", "es", "pt-BR"];
pub const DEFAULT_START_ID: u32 = 1;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub category: String,
    pub id_prefix: String,
    pub markdown_dir: PathBuf,
    pub json_dir: PathBuf,
    pub start_id: u32,
    pub languages: Vec<String>,
    pub manifest: Option<PathBuf>,
    pub id_strategy: IdStrategy,
    pub metadata: MetadataDefaults,
    pub expected_clues: usize,
    pub dry_run: bool,
}

impl RunConfig {
    /// Defaults for everything but the category and directories. The id
    /// prefix defaults to the lowercased category.
    pub fn new(
        category: &str,
        markdown_dir: impl Into<PathBuf>,
        json_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            category: category.to_string(),
            id_prefix: category.to_lowercase(),
            markdown_dir: markdown_dir.into(),
            json_dir: json_dir.into(),
            start_id: DEFAULT_START_ID,
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            manifest: None,
            id_strategy: IdStrategy::Fixed,
            metadata: MetadataDefaults::default(),
            expected_clues: EXPECTED_CLUES,
            dry_run: false,
        }
    }
}

/// Drops repeated language codes, keeping the first occurrence.
pub fn dedup_languages(languages: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(languages.len());
    for language in languages {
        if unique.contains(&language) {
            tracing::warn!("Language {} listed more than once, processing it once", language);
        } else {
            unique.push(language);
        }
    }
    unique
}

impl ConfigProvider for RunConfig {
    fn category(&self) -> &str {
        &self.category
    }

    fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    fn markdown_dir(&self) -> &Path {
        &self.markdown_dir
    }

    fn json_dir(&self) -> &Path {
        &self.json_dir
    }

    fn start_id(&self) -> u32 {
        self.start_id
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn manifest(&self) -> Option<&Path> {
        self.manifest.as_deref()
    }

    fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    fn metadata(&self) -> &MetadataDefaults {
        &self.metadata
    }

    fn expected_clues(&self) -> usize {
        self.expected_clues
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path_segment("category", &self.category_slug())?;
        validation::validate_identifier("id_prefix", &self.id_prefix)?;
        validation::validate_path("markdown_dir", &self.markdown_dir)?;
        validation::validate_path("json_dir", &self.json_dir)?;
        if let Some(manifest) = &self.manifest {
            validation::validate_path("manifest", manifest)?;
        }
        validation::validate_languages("languages", &self.languages)?;
        validation::validate_non_empty_string("difficulty", &self.metadata.difficulty)?;
        validation::validate_non_empty_string("source", &self.metadata.source)?;
        validation::validate_positive_number("expected_clues", self.expected_clues, 1)?;
        Ok(())
    }
}

use crate::utils::error::{ErrorCategory, EtlError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIFFICULTY: &str = "medium";
pub const DEFAULT_SOURCE: &str = "entertainment";
pub const EXPECTED_CLUES: usize = 20;

/// One numbered entry of a markdown listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    pub title: String,
    pub clues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub language: String,
    pub difficulty: String,
    pub source: String,
}

/// A quiz entry as stored in a language dataset. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub category: String,
    pub name: String,
    pub clues: Vec<String>,
    pub metadata: ProfileMetadata,
}

/// Metadata values stamped on every generated profile, apart from the language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDefaults {
    pub difficulty: String,
    pub source: String,
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Number from the configured start id, whatever the dataset holds.
    #[default]
    Fixed,
    /// Start after the highest id already present for the prefix.
    ContinueExisting,
}

/// Outcome of one language in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageResult {
    pub language: String,
    pub added: usize,
    pub error: Option<String>,
    pub error_category: Option<ErrorCategory>,
}

impl LanguageResult {
    pub fn ok(language: &str, added: usize) -> Self {
        Self {
            language: language.to_string(),
            added,
            error: None,
            error_category: None,
        }
    }

    pub fn failed(language: &str, error: &EtlError) -> Self {
        Self {
            language: language.to_string(),
            added: 0,
            error: Some(error.to_string()),
            error_category: Some(error.category()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    NotRequested,
    Missing,
    /// Dry runs never touch the manifest.
    Skipped,
    /// The manifest has no entry for the category; the file is left as is.
    CategoryNotFound,
    Updated { locales: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub results: Vec<LanguageResult>,
    pub manifest: ManifestOutcome,
}

impl RunSummary {
    pub fn total_added(&self) -> usize {
        self.results.iter().map(|r| r.added).sum()
    }

    pub fn added_for(&self, language: &str) -> Option<usize> {
        self.results
            .iter()
            .find(|r| r.language == language)
            .map(|r| r.added)
    }

    pub fn exit_code(&self) -> i32 {
        if self.total_added() > 0 {
            0
        } else {
            1
        }
    }
}

use crate::config::toml_config::TomlConfig;
use crate::config::{dedup_languages, RunConfig, DEFAULT_LANGUAGES, DEFAULT_START_ID};
use crate::domain::model::{IdStrategy, MetadataDefaults, EXPECTED_CLUES};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-etl")]
#[command(about = "Convert markdown profile files to JSON data format")]
pub struct CliConfig {
    /// Category name (e.g. "Movies")
    #[arg(long, required_unless_present = "config")]
    pub category: Option<String>,

    /// ID prefix for profiles (e.g. "movie"). Defaults to the lowercased category
    #[arg(long)]
    pub id_prefix: Option<String>,

    /// Directory containing markdown files
    #[arg(long, required_unless_present = "config")]
    pub markdown_dir: Option<PathBuf>,

    /// Root directory containing JSON data files
    #[arg(long, required_unless_present = "config")]
    pub json_dir: Option<PathBuf>,

    /// Starting ID for new profiles [default: 1]
    #[arg(long)]
    pub start_id: Option<u32>,

    /// Language codes to process [default: en es pt-BR]
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Path to manifest.json to update profile counts
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// TOML file supplying any of the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Continue numbering after the highest id already in each dataset
    #[arg(long)]
    pub auto_id: bool,

    /// Difficulty stamped on new profiles [default: medium]
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Source stamped on new profiles [default: entertainment]
    #[arg(long)]
    pub source: Option<String>,

    /// Clue count per profile that does not trigger a warning [default: 20]
    #[arg(long)]
    pub expected_clues: Option<usize>,

    /// Parse and merge without writing any file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the config file, if any, and merges it under the command-line values.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        self.merge(file.unwrap_or_default())
    }

    pub fn merge(&self, file: TomlConfig) -> Result<RunConfig> {
        let TomlConfig {
            conversion,
            paths,
            metadata,
        } = file;

        let category = self.category.clone().or(conversion.category);
        let category = validate_required_field("category", &category)?.clone();

        let markdown_dir = self.markdown_dir.clone().or(paths.markdown_dir);
        let markdown_dir = validate_required_field("markdown_dir", &markdown_dir)?.clone();

        let json_dir = self.json_dir.clone().or(paths.json_dir);
        let json_dir = validate_required_field("json_dir", &json_dir)?.clone();

        let id_prefix = self
            .id_prefix
            .clone()
            .or(conversion.id_prefix)
            .unwrap_or_else(|| category.to_lowercase());

        let languages = self
            .languages
            .clone()
            .or(conversion.languages)
            .unwrap_or_else(|| DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect());

        let id_strategy = if self.auto_id || conversion.auto_id.unwrap_or(false) {
            IdStrategy::ContinueExisting
        } else {
            IdStrategy::Fixed
        };

        let defaults = MetadataDefaults::default();

        Ok(RunConfig {
            category,
            id_prefix,
            markdown_dir,
            json_dir,
            start_id: self
                .start_id
                .or(conversion.start_id)
                .unwrap_or(DEFAULT_START_ID),
            languages: dedup_languages(languages),
            manifest: self.manifest.clone().or(paths.manifest),
            id_strategy,
            metadata: MetadataDefaults {
                difficulty: self
                    .difficulty
                    .clone()
                    .or(metadata.difficulty)
                    .unwrap_or(defaults.difficulty),
                source: self
                    .source
                    .clone()
                    .or(metadata.source)
                    .unwrap_or(defaults.source),
            },
            expected_clues: self
                .expected_clues
                .or(conversion.expected_clues)
                .unwrap_or(EXPECTED_CLUES),
            dry_run: self.dry_run,
        })
    }
}

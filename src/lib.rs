pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::RunConfig;
pub use crate::core::{etl::EtlEngine, manifest::ManifestUpdater, updater::DataUpdater};
pub use domain::model::{LanguageResult, ManifestOutcome, RunSummary};
pub use domain::ports::LanguagePipeline;
pub use utils::error::{EtlError, Result};

pub mod dataset;
pub mod etl;
pub mod manifest;
pub mod parser;
pub mod profile;
pub mod updater;

pub use crate::domain::model::{MarkdownSection, Profile, RunSummary};
pub use crate::domain::ports::{ConfigProvider, LanguagePipeline, Reporter, Storage};
pub use crate::utils::error::Result;

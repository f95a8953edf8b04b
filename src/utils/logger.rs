use crate::domain::ports::{Reporter, RunEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("profile_etl=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("profile_etl=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}

/// Forwards domain events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: RunEvent) {
        match event {
            RunEvent::UnparsableTitle { line } => {
                tracing::warn!("Could not parse title from: {}", line);
            }
            RunEvent::ClueCountMismatch {
                title,
                found,
                expected,
            } => {
                tracing::warn!(
                    "Profile '{}' has {} clues, expected {}",
                    title,
                    found,
                    expected
                );
            }
            RunEvent::NoProfilesFound { path } => {
                tracing::warn!("No profiles found in {}", path.display());
            }
            RunEvent::DuplicateId { id, language } => {
                tracing::warn!("⚠️ {}: id {} already exists in dataset", language, id);
            }
            RunEvent::ValidationFailed { path, reason } => {
                tracing::error!("JSON validation failed for {}: {}", path.display(), reason);
            }
        }
    }
}

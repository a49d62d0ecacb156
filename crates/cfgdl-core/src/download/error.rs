//! Failure of a project archive download.

use thiserror::Error;

/// Why a download did not produce a file. The display text is what the user
/// sees after the `Failed to generate project files.` prefix; upstream
/// variants render the whole context chain so the root cause stays visible.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The fetched configuration has no cluster with the requested id.
    #[error("Cluster {name} not found")]
    NotFound { name: String },
    /// Fetching or normalizing the configuration failed.
    #[error("{0:#}")]
    Fetch(#[source] anyhow::Error),
    /// The archive builder failed.
    #[error("{0:#}")]
    Build(#[source] anyhow::Error),
    /// Writing the archive failed.
    #[error("{0:#}")]
    Save(#[source] anyhow::Error),
}

impl DownloadError {
    /// Message handed to the error reporter.
    pub fn user_message(&self) -> String {
        format!("{} {}", FAILURE_PREFIX, self)
    }
}

/// Prefix of every reported download failure.
pub const FAILURE_PREFIX: &str = "Failed to generate project files.";

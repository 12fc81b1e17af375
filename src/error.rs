use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No account exists for the given login
    #[error("{0} not found")]
    NotFound(String),

    /// A member page request failed during collection
    #[error("Failed to fetch page {page} of members for {org}")]
    PageFetchFailed {
        org: String,
        page: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The JSON export file could not be written
    #[error("Failed to write {}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    GitHub(#[from] octocrab::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

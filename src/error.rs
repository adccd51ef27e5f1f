use crate::browser::SessionError;

/// Errors that abort a pipeline, persistence or the query API
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: SessionError },

    #[error("Required interaction '{action}' failed: {source}")]
    Interaction { action: String, source: SessionError },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown table '{0}'")]
    UnknownTable(String),
}

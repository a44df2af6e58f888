use thiserror::Error;

/// Pipeline-level error type.
/// Every variant that reaches `main` aborts the run; recoverable per-record
/// failures are handled inside their stage and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document download from {url} failed with status {status}")]
    DocumentStatus { url: String, status: u16 },

    #[error("Text extraction error: {0}")]
    Extraction(String),
}

impl PipelineError {
    /// Whether the enrichment stage may record this error against a single
    /// record and move on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::Http(_) | PipelineError::Extraction(_))
    }
}

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::PipelineError;

/// Turns document bytes into raw text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, PipelineError>;
}

/// PDF text extraction via `pdf-extract`.
/// Parsing is CPU-bound and may panic on malformed input, so it runs on a
/// blocking thread and a panic becomes an ordinary extraction error.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, PipelineError> {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| PipelineError::Extraction(format!("extractor task failed: {e}")))?
            .map_err(|e| PipelineError::Extraction(e.to_string()))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::errors::PipelineError;

/// Where résumé bytes come from. The enricher only sees this trait, so tests
/// and alternative transports can stand in for HTTP.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the document body.
    /// A non-success status must surface as `PipelineError::DocumentStatus`.
    async fn fetch(&self, url: &str) -> Result<Bytes, PipelineError>;
}

/// Downloads documents with a plain GET.
#[derive(Clone)]
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    pub fn new(timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, PipelineError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PipelineError::DocumentStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(url, bytes = body.len(), "Downloaded document");
        Ok(body)
    }
}

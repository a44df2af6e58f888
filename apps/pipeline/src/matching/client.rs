use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::PipelineError;

/// Raw reply from the scoring service. The body is kept as text so an
/// unparseable response can still be logged verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReply {
    pub status: u16,
    pub body: String,
}

/// Submits one match request.
#[async_trait]
pub trait MatchService: Send + Sync {
    async fn submit(&self, body: &Value) -> Result<MatchReply, PipelineError>;
}

/// POSTs JSON to the configured scoring endpoint. No timeout and no retries.
#[derive(Clone)]
pub struct HttpMatchService {
    client: Client,
    endpoint: String,
}

impl HttpMatchService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn submit(&self, body: &Value) -> Result<MatchReply, PipelineError> {
        debug!(endpoint = %self.endpoint, "Submitting match request");

        let response = self.client.post(&self.endpoint).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(MatchReply { status, body })
    }
}

//! LLM Client: the single point of entry for calls to the external text-generation service.
//!
//! No other module talks to the endpoint directly. Scoring and chat go through
//! `LlmClient`, which owns the model identifier and delegates the wire call to an
//! `LlmTransport`. Production uses `HttpTransport`; tests inject a stub.
//!
//! Wire format: `POST {endpoint}` with `{"model", "prompt", "stream": false}`,
//! reply `{"response": "..."}`. Every failure surfaces as `LlmError` and callers
//! decide how to degrade. No retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection failure, timeout, or an undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// The seam between prompt logic and the network.
#[async_trait]
pub trait LlmTransport: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Blocking-style (non-streaming) JSON POST with a bounded timeout.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl LlmTransport for HttpTransport {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}

#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn LlmTransport>,
    model: String,
}

impl LlmClient {
    /// Client backed by the real HTTP endpoint.
    pub fn http(endpoint: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(endpoint, timeout)?;
        Ok(Self::with_transport(Arc::new(transport), model))
    }

    pub fn with_transport(transport: Arc<dyn LlmTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one prompt and returns the raw reply text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending prompt to text-generation service"
        );
        let reply = self.transport.generate(&self.model, prompt).await?;
        debug!(reply_chars = reply.len(), "Text-generation call succeeded");
        Ok(reply)
    }
}

//! Remote delivery of submissions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result, TransportFailure};

/// Something that can take a submission payload in a single attempt
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Where submissions go, for logs and messages
    fn endpoint(&self) -> &str;

    /// Make exactly one delivery attempt. Any error is `Error::SubmissionTransport`.
    async fn deliver(&self, payload: &Value) -> Result<()>;
}

/// JSON POST to the sheet webhook; only HTTP 200 counts as delivered
pub struct WebhookTransport {
    url: String,
    timeout: Duration,
    client: Client,
}

impl WebhookTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            timeout,
            client,
        })
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        let failure = if err.is_timeout() {
            TransportFailure::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            TransportFailure::Unreachable(err.to_string())
        };
        Error::transport(&self.url, failure)
    }
}

#[async_trait]
impl SubmissionTransport for WebhookTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn deliver(&self, payload: &Value) -> Result<()> {
        debug!(url = %self.url, "Posting submission to webhook");

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(Error::transport(&self.url, TransportFailure::Status(status.as_u16())))
        }
    }
}

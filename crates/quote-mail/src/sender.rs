//! Email delivery
//!
//! [`EmailSender`] is the seam the API server holds: production wires in
//! [`ResendSender`], tests substitute a recording fake.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{SendEmailRequest, SendReceipt, ValidationError};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid email request: {0}")]
    Invalid(#[from] ValidationError),

    #[error("provider rejected the email ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, request: SendEmailRequest) -> Result<SendReceipt, SendError>;
}

/// Sends through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendSender {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ResendSender {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }

    /// Point at a different endpoint, for tests against a local stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[async_trait]
impl EmailSender for ResendSender {
    async fn send(&self, request: SendEmailRequest) -> Result<SendReceipt, SendError> {
        request.validate()?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "email provider rejected send");
            return Err(SendError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ResendResponse = response.json().await?;
        tracing::info!(id = %body.id, "email queued");

        Ok(SendReceipt {
            id: body.id,
            queued_at: Utc::now(),
        })
    }
}

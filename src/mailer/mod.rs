use async_trait::async_trait;
use axum::http::StatusCode;

use crate::{config::MailConfig, models::RelayRequest};

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("email provider responded with {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("email provider request failed: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

/// Capability to hand a single message to an email provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, request: &RelayRequest) -> Result<(), SendError>;
}

/// Sends through a Resend-compatible HTTP API.
#[derive(Clone)]
pub struct ResendSender {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ResendSender {
    pub fn new(config: &MailConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    async fn send(&self, request: &RelayRequest) -> Result<(), SendError> {
        tracing::debug!("Posting message to email provider at {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| SendError::Transport(Box::new(e)))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Email provider accepted message with status {}", status);
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SendError::Transport(Box::new(e)))?;

        Err(SendError::Rejected { status, body })
    }
}

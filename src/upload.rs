use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::record::ScrapeResult;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{}", rejection_message(.body))]
    Rejected { status: StatusCode, body: String },
}

impl UploadError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UploadError::Request(e) => e.status(),
            UploadError::Rejected { status, .. } => Some(*status),
        }
    }
}

/// Outcome reported back to the user, `{"success": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success(String),
    Error(String),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }
}

/// Posts records to the collection endpoint.
pub struct Uploader {
    client: reqwest::Client,
    endpoint: Url,
}

impl Uploader {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Uploader { client, endpoint }
    }

    /// Never fails; transport problems come back as `Status::Error`.
    pub async fn send(&self, record: &ScrapeResult) -> Status {
        match self.try_send(record).await {
            Ok(()) => {
                info!(id = record.id(), kind = record.kind(), "upload succeeded");
                Status::Success("success".to_string())
            }
            Err(e) => {
                warn!(id = record.id(), status = ?e.status(), error = %e, "upload failed");
                Status::Error(e.to_string())
            }
        }
    }

    async fn try_send(&self, record: &ScrapeResult) -> Result<(), UploadError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, body });
        }
        Ok(())
    }
}

/// Server reply with trailing whitespace dropped and every line indented.
fn rejection_message(body: &str) -> String {
    format!("upload failed:\n  {}", body.trim_end().replace('\n', "\n  "))
}

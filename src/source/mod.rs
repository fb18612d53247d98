//! Upstream record source.
//!
//! The store only depends on [`RecordSource`]; [`HttpRecordSource`] is the production
//! implementation that talks to the remote collection endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::AppError;
use crate::models::SourceRecord;

/// Something that can produce the raw record list for a load.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the full record list. Any failure is reported as [`AppError::LoadFailure`].
    async fn fetch_records(&self) -> Result<Vec<SourceRecord>, AppError>;
}

/// Fetches records with a single HTTP GET against a fixed collection URL.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> Result<Vec<SourceRecord>, AppError> {
        tracing::debug!("Requesting records from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Record source returned HTTP {}", status.as_u16());
            return Err(AppError::LoadFailure(format!(
                "Failed to fetch leads (HTTP {})",
                status.as_u16()
            )));
        }

        let records: Vec<SourceRecord> = response.json().await?;
        tracing::debug!("Received {} records", records.len());

        Ok(records)
    }
}

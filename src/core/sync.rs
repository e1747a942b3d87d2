use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_range, validate_url, Validate};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_SYNC_URL: &str = "http://localhost:8004/sync-recent-invoicesdcm";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SYNC_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validate_url("sync_url", &self.url)?;
        validate_range("timeout_secs", self.timeout.as_secs(), 1, 3600)?;
        Ok(())
    }
}

/// What a best-effort run ended with. The process exits successfully either way.
#[derive(Debug)]
pub enum SyncReport {
    Completed(Value),
    Failed(SyncError),
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncReport::Completed(_))
    }
}

pub struct SyncTrigger {
    client: Client,
    config: SyncConfig,
}

impl SyncTrigger {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// One POST without body or credentials. Returns the JSON response.
    pub async fn trigger(&self) -> std::result::Result<Value, SyncError> {
        tracing::debug!("POST {}", self.config.url);

        let response = self
            .client
            .post(&self.config.url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(SyncError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SyncError::Transport)?;

        if !status.is_success() {
            return Err(SyncError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(SyncError::Parse)
    }

    /// Triggers the sync and logs the outcome. Never returns an error.
    pub async fn run_best_effort(&self) -> SyncReport {
        match self.trigger().await {
            Ok(response) => {
                tracing::info!("Sync executed: {}", response);
                SyncReport::Completed(response)
            }
            Err(e) => {
                tracing::error!(category = e.category(), url = %self.config.url, "Sync failed: {}", e);
                SyncReport::Failed(e)
            }
        }
    }
}

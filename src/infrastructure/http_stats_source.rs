// HTTP stats source backed by reqwest
use crate::application::error::SyncError;
use crate::application::stats_source::StatsSource;
use crate::infrastructure::config::ApiSettings;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStatsSource {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch_stats(&self) -> Result<Value, SyncError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("Failed to reach stats API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: an unreadable body is reported as no body.
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: (!body.is_empty()).then_some(body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(format!("Failed to read stats response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| SyncError::Network(format!("Failed to parse stats response: {}", e)))
    }
}

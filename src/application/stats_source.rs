// Source trait for the raw stats payload
use crate::application::error::SyncError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch and decode the stats payload.
    ///
    /// Non-success statuses map to `SyncError::Http`; transport and JSON
    /// decode failures map to `SyncError::Network`. The decoded value is
    /// returned as-is, shape validation happens in the caller.
    async fn fetch_stats(&self) -> Result<Value, SyncError>;
}

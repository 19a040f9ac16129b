// Application layer - Refresh cycle and its seams
pub mod dashboard_sync;
pub mod error;
pub mod stats_source;

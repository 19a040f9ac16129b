// Main entry point - Dependency injection and terminal setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_sync::DashboardSync;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_stats_source::HttpStatsSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_dashboard_config()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create stats source (infrastructure layer)
    let source = Arc::new(HttpStatsSource::new(&config.api)?);
    tracing::info!(endpoint = source.endpoint(), "Starting stats dashboard");

    // Create sync (application layer) and hand it to the terminal (presentation layer)
    let sync = DashboardSync::new(source);
    presentation::terminal::run(sync).await
}

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/stats";
const CONFIG_FILE: &str = "config/dashboard";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub endpoint: String,
    /// Unset means requests may hang indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Load config from defaults, the optional `config/dashboard` file and
/// `DASHBOARD__*` environment variables, in increasing priority.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_with_file(config::File::with_name(CONFIG_FILE).required(false))
}

fn load_with_file<S>(file: S) -> anyhow::Result<DashboardConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("api.endpoint", DEFAULT_ENDPOINT)?
        .set_default("log.filter", "info")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults() {
        let config = load_with_file(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(config.api.endpoint, "http://127.0.0.1:5000/api/stats");
        assert_eq!(config.api.request_timeout(), None);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [api]
            endpoint = "http://stats.internal:8080/api/stats"
            request_timeout_secs = 5

            [log]
            filter = "stats_dashboard=debug"
        "#;
        let config = load_with_file(File::from_str(toml, FileFormat::Toml)).unwrap();
        assert_eq!(config.api.endpoint, "http://stats.internal:8080/api/stats");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.log.filter, "stats_dashboard=debug");
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let toml = r#"
            [api]
            request_timeout_secs = "soon"
        "#;
        assert!(load_with_file(File::from_str(toml, FileFormat::Toml)).is_err());
    }
}

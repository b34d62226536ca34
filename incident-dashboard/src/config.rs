use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use incident_charts::Period;

use crate::error::{DashboardError, DashboardResult};

/// Environment variable prefix, e.g. `INCIDENT_DASHBOARD_BASE_URL`
pub const ENV_PREFIX: &str = "INCIDENT_DASHBOARD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dashboard server origin
    pub base_url: String,

    /// Path of the time-trend endpoint
    pub trend_path: String,

    /// Day-windows offered by the period selector
    pub periods: Vec<u32>,

    /// Window shown before any selection
    pub default_period: u32,

    /// Delay before reloading the page after a refresh click
    pub reload_delay_ms: u64,

    /// Per-request timeout; transport default when unset
    pub request_timeout_ms: Option<u64>,

    /// Refresh button content while the reload is pending
    pub busy_label: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            trend_path: "/dashboard/time_trend".to_string(),
            periods: vec![7, 30, 90, 365],
            default_period: 90,
            reload_delay_ms: 1000,
            request_timeout_ms: None,
            busy_label: r#"<i class="fas fa-spinner fa-spin me-2"></i>Refreshing..."#.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load built-in defaults, then the optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> DashboardResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Self>()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.base_url.is_empty() {
            return Err(DashboardError::InvalidArgument("base_url must not be empty".to_string()));
        }
        if !self.trend_path.starts_with('/') {
            return Err(DashboardError::InvalidArgument(format!(
                "trend_path must start with '/', got '{}'",
                self.trend_path
            )));
        }
        self.period_set()?;
        Period::new(self.default_period)?;
        Ok(())
    }

    /// Configured periods in selector order.
    pub fn period_set(&self) -> DashboardResult<Vec<Period>> {
        if self.periods.is_empty() {
            return Err(DashboardError::InvalidArgument("periods must not be empty".to_string()));
        }
        self.periods
            .iter()
            .map(|days| Period::new(*days).map_err(DashboardError::from))
            .collect()
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.trend_path, "/dashboard/time_trend");
        assert_eq!(config.periods, vec![7, 30, 90, 365]);
        assert_eq!(config.reload_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() -> DashboardResult<()> {
        let config = DashboardConfig::load(None)?;
        assert_eq!(config.default_period, 90);
        assert_eq!(config.periods, vec![7, 30, 90, 365]);
        Ok(())
    }

    #[test]
    fn test_load_config_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            r#"
base_url = "http://dashboard.local:8080"
periods = [7, 14]
reload_delay_ms = 250
request_timeout_ms = 5000
"#
        )?;

        let config = DashboardConfig::load(Some(file.path()))?;
        assert_eq!(config.base_url, "http://dashboard.local:8080");
        assert_eq!(config.periods, vec![7, 14]);
        assert_eq!(config.reload_delay(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.trend_path, "/dashboard/time_trend");
        Ok(())
    }

    #[test]
    fn test_environment_override() -> DashboardResult<()> {
        std::env::set_var("INCIDENT_DASHBOARD_BUSY_LABEL", "Loading");
        let config = DashboardConfig::load(None);
        std::env::remove_var("INCIDENT_DASHBOARD_BUSY_LABEL");

        assert_eq!(config?.busy_label, "Loading");
        Ok(())
    }

    #[test]
    fn test_validation_rejects_bad_periods() {
        let config = DashboardConfig {
            periods: vec![7, 0],
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            periods: Vec::new(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(DashboardError::InvalidArgument(_))));
    }
}

use incident_charts::ChartError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    /// Network or response failures, as opposed to local misuse.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::Fetch(_) | DashboardError::HttpStatus { .. } | DashboardError::Decode(_)
        )
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

use thiserror::Error;

/// Main error type for chart construction and formatting
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Duplicate category label: {0}")]
    DuplicateLabel(String),

    #[error("Length mismatch: {labels} labels, {values} values")]
    LengthMismatch { labels: usize, values: usize },

    #[error("Invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Unknown chart kind: {0}")]
    UnknownChartKind(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

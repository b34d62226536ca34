//! Chart data fetch contract
//!
//! Every chart-data endpoint answers `GET` with `{ "labels": [...], "data": [...] }`.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error};

use incident_charts::{update_chart, Period};

use crate::config::DashboardConfig;
use crate::controller::{lock_chart, SharedChart};
use crate::error::{DashboardError, DashboardResult};

/// Response body of a chart-data endpoint.
///
/// Missing `labels` or `data` decode as empty, which renders an empty chart
/// instead of failing the update. A `null` point decodes as NaN and is
/// serialized back as `null`, so the chart shows a gap there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "points_with_gaps")]
    pub data: Vec<f64>,
}

fn points_with_gaps<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let points = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(points.into_iter().map(|p| p.unwrap_or(f64::NAN)).collect())
}

#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// Fetch chart data from `endpoint`, a server-relative path with query.
    async fn fetch(&self, endpoint: &str) -> DashboardResult<ChartPayload>;
}

/// Endpoint for the trend chart over `period`, e.g. `/dashboard/time_trend?days=30`.
pub fn trend_endpoint(trend_path: &str, period: Period) -> String {
    format!("{}?days={}", trend_path, period.days())
}

/// [`ChartDataSource`] backed by the dashboard server over HTTP
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `endpoint`; absolute endpoints pass through.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

#[async_trait]
impl ChartDataSource for HttpDataSource {
    async fn fetch(&self, endpoint: &str) -> DashboardResult<ChartPayload> {
        let url = self.url_for(endpoint);
        debug!("Fetching chart data from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Fetch `endpoint` and feed its `labels`/`data` straight into the chart.
///
/// Failures are logged and returned; the chart keeps its current data.
pub async fn fetch_chart_data(
    source: &dyn ChartDataSource,
    endpoint: &str,
    chart: &SharedChart,
) -> DashboardResult<()> {
    match source.fetch(endpoint).await {
        Ok(payload) => {
            update_chart(&mut *lock_chart(chart), payload.labels, payload.data);
            Ok(())
        }
        Err(e) => {
            error!("Error fetching chart data from {}: {}", endpoint, e);
            Err(e)
        }
    }
}

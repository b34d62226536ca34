use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

/// Day-windows offered by the dashboard's period selector
pub const STANDARD_PERIODS: [u32; 4] = [7, 30, 90, 365];

/// Largest period still bucketed per day
pub const DAY_GRANULARITY_MAX: u32 = 30;

/// Largest period still bucketed per week
pub const WEEK_GRANULARITY_MAX: u32 = 90;

/// Ordered label/value pairs driving a single chart.
///
/// Labels are unique and insertion order is display order. On the wire the
/// series travels as the dashboard's `{ "labels": [...], "data": [...] }`
/// shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeriesParts", into = "SeriesParts")]
pub struct CategorySeries {
    entries: Vec<(String, u64)>,
}

/// Wire form of a [`CategorySeries`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesParts {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl CategorySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from parallel label and value vectors.
    pub fn from_parts(labels: Vec<String>, values: Vec<u64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(ChartError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }

        let mut series = Self::new();
        for (label, value) in labels.into_iter().zip(values) {
            series.push(label, value)?;
        }
        Ok(series)
    }

    /// Append a category. Fails if the label is already present.
    pub fn push(&mut self, label: impl Into<String>, value: u64) -> Result<()> {
        let label = label.into();
        if self.entries.iter().any(|(existing, _)| *existing == label) {
            return Err(ChartError::DuplicateLabel(label));
        }
        self.entries.push((label, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    /// Values as chart data points.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value as f64).collect()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }
}

impl TryFrom<SeriesParts> for CategorySeries {
    type Error = ChartError;

    fn try_from(parts: SeriesParts) -> Result<Self> {
        Self::from_parts(parts.labels, parts.data)
    }
}

impl From<CategorySeries> for SeriesParts {
    fn from(series: CategorySeries) -> Self {
        let (labels, data) = series.entries.into_iter().unzip();
        Self { labels, data }
    }
}

/// Time-axis bucketing for the trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn for_period(days: u32) -> Self {
        if days <= DAY_GRANULARITY_MAX {
            Granularity::Day
        } else if days <= WEEK_GRANULARITY_MAX {
            Granularity::Week
        } else {
            Granularity::Month
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer day-window parameterizing the trend fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Period(u32);

impl Period {
    pub fn new(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(ChartError::InvalidArgument(
                "period must be at least one day".to_string(),
            ));
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn granularity(&self) -> Granularity {
        Granularity::for_period(self.0)
    }

    /// The selector's standard set, shortest first.
    pub fn standard() -> Vec<Period> {
        STANDARD_PERIODS.iter().map(|days| Period(*days)).collect()
    }
}

impl TryFrom<u32> for Period {
    type Error = ChartError;

    fn try_from(days: u32) -> Result<Self> {
        Self::new(days)
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.0
    }
}

/// Parses the value of a `data-period` attribute.
impl FromStr for Period {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let days = s
            .trim()
            .parse::<u32>()
            .map_err(|e| ChartError::InvalidArgument(format!("invalid period '{}': {}", s, e)))?;
        Self::new(days)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_thresholds() {
        assert_eq!(Granularity::for_period(7), Granularity::Day);
        assert_eq!(Granularity::for_period(30), Granularity::Day);
        assert_eq!(Granularity::for_period(31), Granularity::Week);
        assert_eq!(Granularity::for_period(90), Granularity::Week);
        assert_eq!(Granularity::for_period(91), Granularity::Month);
        assert_eq!(Granularity::for_period(365), Granularity::Month);
    }

    #[test]
    fn test_granularity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Granularity::Week).unwrap(), "\"week\"");
        assert_eq!(Granularity::Month.to_string(), "month");
    }

    #[test]
    fn test_series_preserves_insertion_order() {
        let mut series = CategorySeries::new();
        series.push("Finance", 12).unwrap();
        series.push("Healthcare", 3).unwrap();
        series.push("Energy", 7).unwrap();

        assert_eq!(series.labels(), vec!["Finance", "Healthcare", "Energy"]);
        assert_eq!(series.values(), vec![12.0, 3.0, 7.0]);
        assert_eq!(series.total(), 22);
    }

    #[test]
    fn test_series_rejects_duplicates_and_mismatch() {
        let mut series = CategorySeries::new();
        series.push("Finance", 1).unwrap();
        assert!(matches!(
            series.push("Finance", 2),
            Err(ChartError::DuplicateLabel(label)) if label == "Finance"
        ));

        let err = CategorySeries::from_parts(vec!["a".into()], vec![1, 2]).unwrap_err();
        assert!(matches!(err, ChartError::LengthMismatch { labels: 1, values: 2 }));
    }

    #[test]
    fn test_series_wire_shape() {
        let series: CategorySeries =
            serde_json::from_str(r#"{"labels":["Low","High"],"data":[4,9]}"#).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            serde_json::json!({"labels": ["Low", "High"], "data": [4, 9]})
        );

        let duplicate = serde_json::from_str::<CategorySeries>(r#"{"labels":["a","a"],"data":[1,2]}"#);
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_period_parsing() {
        let period: Period = "30".parse().unwrap();
        assert_eq!(period.days(), 30);
        assert_eq!(period.granularity(), Granularity::Day);
        assert!("0".parse::<Period>().is_err());
        assert!("week".parse::<Period>().is_err());
        assert_eq!(
            Period::standard().iter().map(Period::days).collect::<Vec<_>>(),
            vec![7, 30, 90, 365]
        );
    }
}

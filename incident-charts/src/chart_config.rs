//! Chart.js configuration model
//!
//! Typed mirror of the configuration object handed to `new Chart(ctx, config)`.
//! Keys serialize in camelCase and unset fields are omitted, so the JSON can be
//! passed to the charting library as-is.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::percentage_label;
use crate::types::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Pie,
    Doughnut,
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

/// A single color for the whole dataset or one color per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Single(color.to_string())
    }
}

impl From<Vec<String>> for ColorSpec {
    fn from(colors: Vec<String>) -> Self {
        ColorSpec::PerPoint(colors)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    #[serde(default)]
    pub plugins: Plugins,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            index_axis: None,
            scales: None,
            plugins: Plugins::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    #[serde(default)]
    pub x: Axis,
    #[serde(default)]
    pub y: Axis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticks {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeScale {
    pub unit: Granularity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Tooltip callbacks are functions on the JS side and never serialized;
    /// the host asks [`ChartConfig::tooltip_text`] for the label instead.
    #[serde(skip)]
    pub tooltip: TooltipStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendLabels {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
    pub color: String,
    pub font: TitleFont,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleFont {
    pub size: u32,
}

/// How hovering a data point is labelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TooltipStyle {
    /// Library default
    #[default]
    Plain,
    /// `label: value (pct%)` relative to the dataset total
    Percentage,
}

impl ChartConfig {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            data: ChartData::default(),
            options: ChartOptions::default(),
        }
    }

    /// The dataset that data updates target, created on first use.
    pub fn primary_dataset_mut(&mut self) -> &mut Dataset {
        if self.data.datasets.is_empty() {
            self.data.datasets.push(Dataset::default());
        }
        &mut self.data.datasets[0]
    }

    pub fn primary_data(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_time_unit(&mut self, unit: Granularity) {
        let scales = self.options.scales.get_or_insert_with(Scales::default);
        scales.x.time = Some(TimeScale { unit });
    }

    pub fn time_unit(&self) -> Option<Granularity> {
        self.options
            .scales
            .as_ref()
            .and_then(|scales| scales.x.time)
            .map(|time| time.unit)
    }

    /// Tooltip text for the data point at `index` of the primary dataset.
    pub fn tooltip_text(&self, index: usize) -> Option<String> {
        let value = *self.primary_data().get(index)?;
        let label = self.data.labels.get(index).map(String::as_str).unwrap_or("");

        match self.options.plugins.tooltip {
            TooltipStyle::Percentage => {
                let total: f64 = self.primary_data().iter().sum();
                Some(percentage_label(label, value, total))
            }
            TooltipStyle::Plain => Some(format!("{}: {}", label, value)),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! Configuration builders for each dashboard chart

use std::fmt;
use std::str::FromStr;

use crate::chart_config::{
    Axis, ChartConfig, ChartType, ColorSpec, Dataset, Grid, IndexAxis, Legend, LegendLabels,
    Scales, Ticks, Title, TitleFont, TooltipStyle,
};
use crate::error::ChartError;
use crate::palette::{generate_palette, severity_colors};
use crate::types::CategorySeries;

/// Foreground color for legends, ticks and titles on the dark theme
pub const TEXT_COLOR: &str = "#c8c8c8";
pub const GRID_COLOR: &str = "rgba(255, 255, 255, 0.1)";
/// Outline drawn between pie and doughnut slices
pub const SLICE_BORDER_COLOR: &str = "#343a40";
pub const TITLE_FONT_SIZE: u32 = 16;

const TREND_COLOR: &str = "#0d6efd";
const TREND_FILL: &str = "rgba(13, 110, 253, 0.2)";

/// The charts rendered on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Sector,
    Severity,
    Trend,
    Source,
    Actor,
    MonthlyTrend,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Sector,
        ChartKind::Severity,
        ChartKind::Trend,
        ChartKind::Source,
        ChartKind::Actor,
        ChartKind::MonthlyTrend,
    ];

    pub fn build(&self, series: &CategorySeries) -> ChartConfig {
        match self {
            ChartKind::Sector => sector_chart(series),
            ChartKind::Severity => severity_chart(series),
            ChartKind::Trend => trend_chart(series),
            ChartKind::Source => source_chart(series),
            ChartKind::Actor => actor_chart(series),
            ChartKind::MonthlyTrend => monthly_trend_chart(series),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Sector => "sector",
            ChartKind::Severity => "severity",
            ChartKind::Trend => "trend",
            ChartKind::Source => "source",
            ChartKind::Actor => "actor",
            ChartKind::MonthlyTrend => "monthly",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnknownChartKind(s.to_string()))
    }
}

/// Pie chart of incidents per sector, colored positionally.
pub fn sector_chart(series: &CategorySeries) -> ChartConfig {
    let colors = generate_palette(series.len());
    distribution_chart(ChartType::Pie, series, colors, "Incidents by Sector")
}

/// Doughnut chart of incidents per severity, colored by severity label.
pub fn severity_chart(series: &CategorySeries) -> ChartConfig {
    let colors = severity_colors(&series.labels());
    distribution_chart(ChartType::Doughnut, series, colors, "Incidents by Severity")
}

/// Filled line chart of daily incident counts.
pub fn trend_chart(series: &CategorySeries) -> ChartConfig {
    let mut config = ChartConfig::new(ChartType::Line);
    config.data.labels = series.labels();
    config.data.datasets.push(Dataset {
        label: Some("Incidents".to_string()),
        data: series.values(),
        background_color: Some(ColorSpec::from(TREND_FILL)),
        border_color: Some(ColorSpec::from(TREND_COLOR)),
        border_width: Some(2),
        point_radius: Some(3),
        point_background_color: Some(TREND_COLOR.to_string()),
        tension: Some(0.4),
        fill: Some(true),
    });
    config.options.scales = Some(Scales {
        x: gridded_axis(),
        y: count_axis(),
    });
    hide_legend(&mut config);
    config.options.plugins.title = Some(title("Incident Trend Over Time"));
    config
}

/// Horizontal bar chart of the top incident sources.
pub fn source_chart(series: &CategorySeries) -> ChartConfig {
    horizontal_bar_chart(series, (13, 202, 240), "Top Sources of Incidents")
}

/// Horizontal bar chart of the most active threat actors.
pub fn actor_chart(series: &CategorySeries) -> ChartConfig {
    horizontal_bar_chart(series, (253, 126, 20), "Top Threat Actors")
}

/// Vertical bar chart of incidents per month.
pub fn monthly_trend_chart(series: &CategorySeries) -> ChartConfig {
    let mut config = bar_chart(series, (13, 110, 253));
    config.options.scales = Some(Scales {
        x: gridded_axis(),
        y: count_axis(),
    });
    hide_legend(&mut config);
    config.options.plugins.title = Some(title("Monthly Incident Trend"));
    config
}

fn distribution_chart(
    chart_type: ChartType,
    series: &CategorySeries,
    colors: Vec<String>,
    heading: &str,
) -> ChartConfig {
    let mut config = ChartConfig::new(chart_type);
    config.data.labels = series.labels();
    config.data.datasets.push(Dataset {
        data: series.values(),
        background_color: Some(ColorSpec::PerPoint(colors)),
        border_width: Some(1),
        border_color: Some(ColorSpec::from(SLICE_BORDER_COLOR)),
        ..Dataset::default()
    });
    config.options.plugins.legend = Some(Legend {
        display: None,
        position: Some("right".to_string()),
        labels: Some(LegendLabels {
            color: TEXT_COLOR.to_string(),
        }),
    });
    config.options.plugins.title = Some(title(heading));
    config.options.plugins.tooltip = TooltipStyle::Percentage;
    config
}

fn horizontal_bar_chart(series: &CategorySeries, rgb: (u8, u8, u8), heading: &str) -> ChartConfig {
    let mut config = bar_chart(series, rgb);
    config.options.index_axis = Some(IndexAxis::Y);
    config.options.scales = Some(Scales {
        x: count_axis(),
        y: Axis {
            grid: Some(Grid {
                color: None,
                display: Some(false),
            }),
            ticks: Some(text_ticks(None)),
            ..Axis::default()
        },
    });
    hide_legend(&mut config);
    config.options.plugins.title = Some(title(heading));
    config
}

fn bar_chart(series: &CategorySeries, (r, g, b): (u8, u8, u8)) -> ChartConfig {
    let mut config = ChartConfig::new(ChartType::Bar);
    config.data.labels = series.labels();
    config.data.datasets.push(Dataset {
        label: Some("Incidents".to_string()),
        data: series.values(),
        background_color: Some(ColorSpec::Single(format!("rgba({}, {}, {}, 0.7)", r, g, b))),
        border_color: Some(ColorSpec::Single(format!("rgba({}, {}, {}, 1)", r, g, b))),
        border_width: Some(1),
        ..Dataset::default()
    });
    config
}

fn gridded_axis() -> Axis {
    Axis {
        grid: Some(Grid {
            color: Some(GRID_COLOR.to_string()),
            display: None,
        }),
        ticks: Some(text_ticks(None)),
        ..Axis::default()
    }
}

// Incident counts are whole numbers, so ticks never show fractions.
fn count_axis() -> Axis {
    Axis {
        begin_at_zero: Some(true),
        ticks: Some(text_ticks(Some(0))),
        ..gridded_axis()
    }
}

fn text_ticks(precision: Option<u32>) -> Ticks {
    Ticks {
        color: TEXT_COLOR.to_string(),
        precision,
    }
}

fn hide_legend(config: &mut ChartConfig) {
    config.options.plugins.legend = Some(Legend {
        display: Some(false),
        ..Legend::default()
    });
}

fn title(text: &str) -> Title {
    Title {
        display: true,
        text: text.to_string(),
        color: TEXT_COLOR.to_string(),
        font: TitleFont {
            size: TITLE_FONT_SIZE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CURATED_COLORS;
    use crate::types::Granularity;
    use serde_json::json;

    fn series(pairs: &[(&str, u64)]) -> CategorySeries {
        let mut series = CategorySeries::new();
        for (label, value) in pairs {
            series.push(*label, *value).unwrap();
        }
        series
    }

    #[test]
    fn test_sector_chart_uses_curated_palette() {
        let config = sector_chart(&series(&[("Finance", 5), ("Energy", 2), ("Telecom", 1)]));

        assert_eq!(config.chart_type, ChartType::Pie);
        assert_eq!(config.data.labels, vec!["Finance", "Energy", "Telecom"]);
        assert_eq!(
            config.data.datasets[0].background_color,
            Some(ColorSpec::PerPoint(
                CURATED_COLORS[..3].iter().map(|c| c.to_string()).collect()
            ))
        );
        assert_eq!(config.options.plugins.tooltip, TooltipStyle::Percentage);
        assert_eq!(
            config.to_json().unwrap()["options"]["plugins"]["legend"],
            json!({"position": "right", "labels": {"color": "#c8c8c8"}})
        );
    }

    #[test]
    fn test_severity_chart_colors_by_label() {
        let config = severity_chart(&series(&[("Critical", 2), ("Low", 4), ("Odd", 1)]));

        assert_eq!(config.chart_type, ChartType::Doughnut);
        assert_eq!(
            config.to_json().unwrap()["data"]["datasets"][0]["backgroundColor"],
            json!(["#dc3545", "#28a745", "#6c757d"])
        );
        assert_eq!(config.tooltip_text(0).as_deref(), Some("Critical: 2 (29%)"));
    }

    #[test]
    fn test_trend_chart_shape() {
        let config = trend_chart(&series(&[("2024-01-01", 3), ("2024-01-02", 0)]));
        let value = config.to_json().unwrap();

        assert_eq!(value["type"], "line");
        assert_eq!(value["data"]["datasets"][0]["label"], "Incidents");
        assert_eq!(value["data"]["datasets"][0]["tension"], 0.4);
        assert_eq!(value["data"]["datasets"][0]["fill"], true);
        assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(value["options"]["scales"]["y"]["ticks"]["precision"], 0);
        assert_eq!(value["options"]["plugins"]["legend"], json!({"display": false}));
        assert_eq!(config.time_unit(), None::<Granularity>);
    }

    #[test]
    fn test_horizontal_bars() {
        for (config, fill) in [
            (source_chart(&series(&[("Twitter", 9)])), "rgba(13, 202, 240, 0.7)"),
            (actor_chart(&series(&[("APT41", 4)])), "rgba(253, 126, 20, 0.7)"),
        ] {
            let value = config.to_json().unwrap();
            assert_eq!(value["type"], "bar");
            assert_eq!(value["options"]["indexAxis"], "y");
            assert_eq!(value["options"]["scales"]["x"]["beginAtZero"], true);
            assert_eq!(value["options"]["scales"]["y"]["grid"], json!({"display": false}));
            assert_eq!(value["data"]["datasets"][0]["backgroundColor"], fill);
        }
    }

    #[test]
    fn test_monthly_trend_is_vertical() {
        let config = monthly_trend_chart(&series(&[("2024-01", 10), ("2024-02", 12)]));
        assert_eq!(config.options.index_axis, None);
        assert_eq!(
            config.options.plugins.title.as_ref().map(|t| t.text.as_str()),
            Some("Monthly Incident Trend")
        );
    }

    #[test]
    fn test_chart_kind_parsing() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
        assert!(matches!(
            "radar".parse::<ChartKind>(),
            Err(ChartError::UnknownChartKind(_))
        ));
    }
}

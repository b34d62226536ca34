//! Incident dashboard chart toolkit
//!
//! Builds Chart.js-compatible configuration for the incident dashboard
//! (sector, severity, trend, source, actor and monthly distributions),
//! assigns category colors, and exposes the charting library as an
//! injected capability so chart updates can run headless.

pub mod types;
pub mod error;
pub mod palette;
pub mod chart_config;
pub mod builders;
pub mod chart;
pub mod format;

pub use types::*;
pub use error::{ChartError, Result};
pub use palette::{
    generate_palette, generate_palette_with_rng, palette_for, severity_color, severity_colors,
    Palette, CURATED_COLORS, SEVERITY_FALLBACK_COLOR,
};
pub use chart_config::{
    Axis, ChartConfig, ChartData, ChartOptions, ChartType, ColorSpec, Dataset, Grid, IndexAxis,
    Legend, LegendLabels, Plugins, Scales, Ticks, TimeScale, Title, TitleFont, TooltipStyle,
};
pub use builders::ChartKind;
pub use chart::{
    apply_trend, clear_chart_data, init_chart, update_chart, ChartBackend, ChartHandle,
    InMemoryBackend, InMemoryChart,
};
pub use format::{format_date, format_number, percentage_label};

//! Incident dashboard controls
//!
//! Binds the dashboard's period selector and refresh button to asynchronous
//! fetch cycles that redraw charts in place. UI elements, page navigation
//! and the charting library are all injected, so the controller runs
//! headless.

pub mod error;
pub mod config;
pub mod source;
pub mod controls;
pub mod controller;
pub mod stats;

pub use crate::error::{DashboardError, DashboardResult};
pub use crate::config::DashboardConfig;
pub use crate::source::{
    fetch_chart_data, trend_endpoint, ChartDataSource, ChartPayload, HttpDataSource,
};
pub use crate::controls::{
    Control, ControlRef, HeadlessControl, HeadlessNavigator, HeadlessText, PageNavigator,
    PeriodButton, TextTarget,
};
pub use crate::controller::{
    bind_controls, lock_chart, update_trend_chart, ControlEvent, RefreshController, SharedChart,
};
pub use crate::stats::{update_dashboard_stats, DashboardStats, StatTargets};

//! Charting library capability
//!
//! The charting library is injected through [`ChartBackend`] and the handles
//! it returns, so update logic never touches a real rendering surface.
//! [`InMemoryChart`] is the headless implementation used by the CLI and tests.

use std::collections::HashSet;

use tracing::debug;

use crate::chart_config::{ChartConfig, ChartData};
use crate::types::Granularity;

/// A constructed chart bound to a rendering surface
pub trait ChartHandle: Send {
    fn config(&self) -> &ChartConfig;

    fn config_mut(&mut self) -> &mut ChartConfig;

    /// Redraw from the currently bound data.
    fn update(&mut self);
}

/// Constructs charts on named canvases
pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Returns `None` when no canvas with `canvas_id` exists.
    fn create(&self, canvas_id: &str, config: ChartConfig) -> Option<Self::Handle>;
}

/// Build a chart on `canvas_id`, skipping silently when the canvas is absent.
pub fn init_chart<B: ChartBackend>(
    backend: &B,
    canvas_id: &str,
    config: ChartConfig,
) -> Option<B::Handle> {
    let handle = backend.create(canvas_id, config);
    if handle.is_none() {
        debug!("Canvas '{}' not found, skipping chart", canvas_id);
    }
    handle
}

/// Replace the bound labels and primary series, then redraw.
///
/// Lengths are not checked against each other; pairing points with labels
/// is left to the charting library.
pub fn update_chart<C: ChartHandle + ?Sized>(chart: &mut C, labels: Vec<String>, data: Vec<f64>) {
    let config = chart.config_mut();
    config.data.labels = labels;
    config.primary_dataset_mut().data = data;
    chart.update();
}

/// Empty the primary series and redraw, leaving labels in place.
pub fn clear_chart_data<C: ChartHandle + ?Sized>(chart: &mut C) {
    chart.config_mut().primary_dataset_mut().data.clear();
    chart.update();
}

/// Apply trend data together with the time-axis unit for its window.
pub fn apply_trend<C: ChartHandle + ?Sized>(
    chart: &mut C,
    labels: Vec<String>,
    data: Vec<f64>,
    unit: Granularity,
) {
    let config = chart.config_mut();
    config.data.labels = labels;
    config.primary_dataset_mut().data = data;
    config.set_time_unit(unit);
    chart.update();
}

/// Headless chart that records every redraw
#[derive(Debug, Clone)]
pub struct InMemoryChart {
    canvas_id: String,
    config: ChartConfig,
    redraws: Vec<ChartData>,
}

impl InMemoryChart {
    pub fn new(canvas_id: impl Into<String>, config: ChartConfig) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            config,
            redraws: Vec::new(),
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws.len()
    }

    /// Data as it was at each redraw, oldest first.
    pub fn redraws(&self) -> &[ChartData] {
        &self.redraws
    }
}

impl ChartHandle for InMemoryChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    fn update(&mut self) {
        self.redraws.push(self.config.data.clone());
    }
}

/// Backend serving a fixed set of canvas ids
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    canvases: HashSet<String>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, canvas_id: impl Into<String>) -> Self {
        self.canvases.insert(canvas_id.into());
        self
    }
}

impl ChartBackend for InMemoryBackend {
    type Handle = InMemoryChart;

    fn create(&self, canvas_id: &str, config: ChartConfig) -> Option<InMemoryChart> {
        self.canvases
            .contains(canvas_id)
            .then(|| InMemoryChart::new(canvas_id, config))
    }
}

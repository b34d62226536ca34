//! Chart refresh controller
//!
//! Period clicks clear the trend chart, fetch the selected window and redraw
//! it with a matching time-axis unit. The refresh button reloads the whole
//! page after a short delay so its busy indicator gets painted first.
//!
//! Fetches are never cancelled or sequenced. If the user clicks faster than
//! the server answers, responses are applied in the order they arrive, so a
//! slow early response can overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

use incident_charts::{apply_trend, clear_chart_data, ChartHandle, Period};

use crate::config::DashboardConfig;
use crate::controls::{ControlRef, PageNavigator, PeriodButton};
use crate::error::DashboardResult;
use crate::source::{trend_endpoint, ChartDataSource};

/// Chart handle shared between the controller and its fetch tasks
pub type SharedChart = Arc<Mutex<dyn ChartHandle>>;

/// Lock a shared chart, recovering the guard from a poisoned lock.
pub fn lock_chart(chart: &SharedChart) -> MutexGuard<'_, dyn ChartHandle + 'static> {
    chart.lock().unwrap_or_else(PoisonError::into_inner)
}

/// User interactions the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Click on the period button at this index
    PeriodClicked(usize),
    RefreshClicked,
}

#[derive(Debug, Clone, Default)]
struct RefreshState {
    selected: Option<Period>,
    /// Set once a reload is pending; the disabled button takes no more clicks.
    reloading: bool,
}

pub struct RefreshController {
    period_buttons: Vec<PeriodButton>,
    refresh_button: Option<ControlRef>,
    chart: SharedChart,
    source: Arc<dyn ChartDataSource>,
    navigator: Arc<dyn PageNavigator>,
    trend_path: String,
    reload_delay: Duration,
    busy_label: String,
    state: Mutex<RefreshState>,
}

/// Bind the period selector and refresh button to `chart`.
///
/// Buttons passed as `None` are not on the page and are dropped from the
/// selector; indices in [`ControlEvent::PeriodClicked`] refer to the bound
/// buttons only.
pub fn bind_controls(
    period_buttons: Vec<(Option<ControlRef>, Period)>,
    refresh_button: Option<ControlRef>,
    chart: SharedChart,
    source: Arc<dyn ChartDataSource>,
    navigator: Arc<dyn PageNavigator>,
    config: &DashboardConfig,
) -> Arc<RefreshController> {
    let period_buttons: Vec<PeriodButton> = period_buttons
        .into_iter()
        .filter_map(|(control, period)| match control {
            Some(control) => Some(PeriodButton::new(control, period)),
            None => {
                debug!("Period button for {} days not found, skipping", period);
                None
            }
        })
        .collect();

    if refresh_button.is_none() {
        debug!("Refresh button not found, skipping");
    }

    Arc::new(RefreshController {
        period_buttons,
        refresh_button,
        chart,
        source,
        navigator,
        trend_path: config.trend_path.clone(),
        reload_delay: config.reload_delay(),
        busy_label: config.busy_label.clone(),
        state: Mutex::new(RefreshState::default()),
    })
}

impl RefreshController {
    pub fn period_buttons(&self) -> &[PeriodButton] {
        &self.period_buttons
    }

    pub fn chart(&self) -> &SharedChart {
        &self.chart
    }

    /// The most recently clicked period, if any.
    pub fn selected_period(&self) -> Option<Period> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .selected
    }

    /// Handle a click on the period button at `index`.
    pub async fn select_period(&self, index: usize) -> DashboardResult<()> {
        let Some(button) = self.period_buttons.get(index) else {
            debug!("No period button at index {}, ignoring click", index);
            return Ok(());
        };
        let period = button.period;

        self.mark_active(index);
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .selected = Some(period);
        info!("Trend period changed to {} days", period);

        update_trend_chart(self.source.as_ref(), &self.chart, &self.trend_path, period).await
    }

    /// Handle a click on whichever bound button selects `period`.
    pub async fn select_days(&self, period: Period) -> DashboardResult<()> {
        match self.period_buttons.iter().position(|b| b.period == period) {
            Some(index) => self.select_period(index).await,
            None => {
                debug!("No period button for {} days, ignoring", period);
                Ok(())
            }
        }
    }

    /// Show the busy indicator, wait, then reload the page.
    ///
    /// Returns false without doing anything when no refresh button is bound
    /// or a reload is already pending.
    pub async fn refresh(&self) -> bool {
        let Some(button) = &self.refresh_button else {
            debug!("Refresh button not bound, ignoring refresh");
            return false;
        };

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.reloading {
                debug!("Reload already pending, ignoring refresh");
                return false;
            }
            state.reloading = true;
        }

        button.set_content(&self.busy_label);
        button.set_disabled(true);
        info!("Reloading dashboard in {:?}", self.reload_delay);

        tokio::time::sleep(self.reload_delay).await;
        self.navigator.reload();
        true
    }

    /// Process one event on its own task, as a click listener would.
    pub fn dispatch(self: &Arc<Self>, event: ControlEvent) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            match event {
                // Failures are reported by the update itself.
                ControlEvent::PeriodClicked(index) => {
                    let _ = controller.select_period(index).await;
                }
                ControlEvent::RefreshClicked => {
                    controller.refresh().await;
                }
            }
        })
    }

    /// Consume events until the channel closes or the page reloads.
    ///
    /// Every click gets its own task so fetches overlap and period clicks
    /// keep working while a reload is pending. The reload tears the page
    /// down, aborting whatever is still in flight.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<ControlEvent>) {
        let mut in_flight = JoinSet::new();
        let mut reloads = JoinSet::new();
        let mut open = true;

        loop {
            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(ControlEvent::PeriodClicked(index)) => {
                        let controller = Arc::clone(&self);
                        in_flight.spawn(async move {
                            let _ = controller.select_period(index).await;
                        });
                    }
                    Some(ControlEvent::RefreshClicked) => {
                        let controller = Arc::clone(&self);
                        reloads.spawn(async move { controller.refresh().await });
                    }
                    None => open = false,
                },
                Some(reloaded) = reloads.join_next(), if !reloads.is_empty() => {
                    if matches!(reloaded, Ok(true)) {
                        in_flight.abort_all();
                        return;
                    }
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                else => break,
            }
        }
    }

    fn mark_active(&self, index: usize) {
        for (i, button) in self.period_buttons.iter().enumerate() {
            button.control.set_active(i == index);
        }
    }
}

/// Clear the trend chart, fetch `period` and redraw with the matching time unit.
///
/// On failure the chart stays empty and the error is logged and returned.
pub async fn update_trend_chart(
    source: &dyn ChartDataSource,
    chart: &SharedChart,
    trend_path: &str,
    period: Period,
) -> DashboardResult<()> {
    clear_chart_data(&mut *lock_chart(chart));

    let endpoint = trend_endpoint(trend_path, period);
    match source.fetch(&endpoint).await {
        Ok(payload) => {
            debug!(
                "Trend for {} days: {} points, unit {}",
                period,
                payload.data.len(),
                period.granularity()
            );
            apply_trend(
                &mut *lock_chart(chart),
                payload.labels,
                payload.data,
                period.granularity(),
            );
            Ok(())
        }
        Err(e) => {
            error!("Error updating trend chart for {} days: {}", period, e);
            Err(e)
        }
    }
}

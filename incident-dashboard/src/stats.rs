use serde::{Deserialize, Serialize};
use std::sync::Arc;

use incident_charts::format_number;

use crate::controls::TextTarget;

/// Headline counters shown above the charts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_incidents: Option<i64>,
    pub recent_count: Option<i64>,
    pub critical_high: Option<i64>,
}

/// Elements showing each counter; `None` when absent from the page
#[derive(Clone, Default)]
pub struct StatTargets {
    pub total: Option<Arc<dyn TextTarget>>,
    pub recent: Option<Arc<dyn TextTarget>>,
    pub critical_high: Option<Arc<dyn TextTarget>>,
}

/// Write formatted counters into their elements without reloading the page.
///
/// A counter is left untouched when its element is missing or its value is
/// absent or zero.
pub fn update_dashboard_stats(stats: &DashboardStats, targets: &StatTargets) {
    let pairs = [
        (&targets.total, stats.total_incidents),
        (&targets.recent, stats.recent_count),
        (&targets.critical_high, stats.critical_high),
    ];

    for (target, value) in pairs {
        if let (Some(target), Some(value)) = (target, value) {
            if value != 0 {
                target.set_text(&format_number(value));
            }
        }
    }
}

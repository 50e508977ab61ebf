//! Assembly of the aggregate numbers the dashboard header renders: risk
//! counts, the overall score, and how much grant/revoke activity the history
//! feed saw in the last week.

use crate::risk::{count_by_risk_level, overall_risk_score};
use chrono::{DateTime, Duration, Utc};
use lib::types::dashboard::DashboardStats;
use lib::types::history::PermissionEvent;
use lib::types::permission::Permission;

/// Window for the recent-activity counter.
const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Compute dashboard stats over the current permission set and event history.
pub fn dashboard_stats(
    permissions: &[Permission],
    events: &[PermissionEvent],
) -> DashboardStats {
    dashboard_stats_at(Utc::now(), permissions, events)
}

/// Clock-injected variant of [`dashboard_stats`].
pub fn dashboard_stats_at(
    now: DateTime<Utc>,
    permissions: &[Permission],
    events: &[PermissionEvent],
) -> DashboardStats {
    let counts = count_by_risk_level(permissions);
    let cutoff = now - Duration::days(RECENT_ACTIVITY_DAYS);
    let recent_activity_count = events.iter().filter(|e| e.timestamp >= cutoff).count();

    DashboardStats {
        total_permissions: permissions.len(),
        safe_count: counts.safe,
        moderate_count: counts.moderate,
        dangerous_count: counts.dangerous,
        recent_activity_count,
        overall_risk_score: overall_risk_score(permissions),
    }
}

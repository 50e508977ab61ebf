use crate::types::permission::{PermissionType, RiskLevel};
use serde::{Deserialize, Serialize};

/// The current filter query. The three selectors are independent and combine
/// by logical AND; an empty/absent selector matches everything.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub risk_level: Option<RiskLevel>,
    pub permission_type: Option<PermissionType>,
}

impl FilterState {
    /// Whether any selector would actually narrow the permission set.
    pub fn is_active(&self) -> bool {
        !self.search_query.trim().is_empty()
            || self.risk_level.is_some()
            || self.permission_type.is_some()
    }
}

/// Aggregate exposure numbers surfaced to the presentation layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_permissions: usize,
    pub safe_count: usize,
    pub moderate_count: usize,
    pub dangerous_count: usize,
    /// Grant/revoke events observed within the last seven days.
    pub recent_activity_count: usize,
    /// Weighted mean of per-permission risk, 0 (all safe) to 100 (all dangerous).
    pub overall_risk_score: u32,
}

//! Population-level risk aggregation over a permission set. Per-permission
//! classification lives on [`RiskLevel::classify`]; this module only tallies
//! and averages the derived tiers.

use lib::types::permission::{Permission, RiskLevel};
use serde::{Deserialize, Serialize};

const SAFE_WEIGHT: u32 = 0;
const MODERATE_WEIGHT: u32 = 50;
const DANGEROUS_WEIGHT: u32 = 100;

/// Exact tally of permissions per risk tier.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub safe: usize,
    pub moderate: usize,
    pub dangerous: usize,
}

/// Count permissions by derived risk tier. An empty set yields all zeros.
pub fn count_by_risk_level(permissions: &[Permission]) -> RiskCounts {
    let mut counts = RiskCounts::default();
    for permission in permissions {
        match permission.risk_level() {
            RiskLevel::Safe => counts.safe += 1,
            RiskLevel::Moderate => counts.moderate += 1,
            RiskLevel::Dangerous => counts.dangerous += 1,
        }
    }
    counts
}

/// Overall risk score for a permission set, in `[0, 100]`.
///
/// Weighted mean of per-permission tiers (safe 0, moderate 50, dangerous 100)
/// rounded to the nearest integer. An empty set scores 0.
pub fn overall_risk_score(permissions: &[Permission]) -> u32 {
    if permissions.is_empty() {
        return 0;
    }
    let total: u32 = permissions
        .iter()
        .map(|permission| match permission.risk_level() {
            RiskLevel::Safe => SAFE_WEIGHT,
            RiskLevel::Moderate => MODERATE_WEIGHT,
            RiskLevel::Dangerous => DANGEROUS_WEIGHT,
        })
        .sum();
    (total as f64 / permissions.len() as f64).round() as u32
}

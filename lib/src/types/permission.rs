use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spend limit above which a bounded write grant is classified as dangerous.
/// The comparison is strict: a limit of exactly 1000 stays moderate.
///
/// Unit-agnostic across tokens: a limit of "1500" is treated the same whether
/// it denominates USDC or an illiquid token. No normalization is attempted.
pub const HIGH_SPEND_THRESHOLD: f64 = 1000.0;

/// The kind of capability a dApp was granted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    Read,
    Write,
    Spend,
}

/// How far the granted capability reaches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Readonly,
    Write,
    Unlimited,
}

/// Risk tier derived from a permission's scope. Never stored as ground
/// truth: always recomputed from access level and spend limit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Moderate,
    Dangerous,
}

/// A cap on how much a dApp may move, as reported by the wallet. The amount
/// is kept as the original decimal string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpendLimit {
    pub amount: String,
    pub token: String,
    pub token_address: String,
}

/// One grant of capability from the wallet to a dApp.
///
/// There is deliberately no `risk_level` field: the tier is a pure function
/// of `access_level` and `spend_limit`, exposed via [`Permission::risk_level`],
/// so it can never drift from the scope fields it is derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Opaque identifier, stable and unique within one session's set.
    pub id: String,
    pub dapp_name: String,
    pub dapp_url: String,
    pub dapp_icon: Option<String>,
    pub permission_type: PermissionType,
    pub access_level: AccessLevel,
    pub spend_limit: Option<SpendLimit>,
    pub granted_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl RiskLevel {
    /// Classify a permission scope into a risk tier.
    ///
    /// Pure, total, and deterministic. Precedence:
    /// 1. readonly access is safe, regardless of any spend limit
    /// 2. unlimited access is dangerous, regardless of any spend limit
    /// 3. write access with no spend limit is moderate
    /// 4. write access with a parseable limit strictly above
    ///    [`HIGH_SPEND_THRESHOLD`] is dangerous
    /// 5. anything else, including an unparseable limit amount, is moderate
    pub fn classify(access_level: AccessLevel, spend_limit: Option<&SpendLimit>) -> RiskLevel {
        match access_level {
            AccessLevel::Readonly => RiskLevel::Safe,
            AccessLevel::Unlimited => RiskLevel::Dangerous,
            AccessLevel::Write => {
                if let Some(limit) = spend_limit {
                    // a malformed amount must not fail: it is merely
                    // "not demonstrably high"
                    if let Ok(value) = limit.amount.trim().parse::<f64>() {
                        if value > HIGH_SPEND_THRESHOLD {
                            return RiskLevel::Dangerous;
                        }
                    }
                }
                RiskLevel::Moderate
            }
        }
    }
}

impl Permission {
    /// The derived risk tier for this permission's scope.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.access_level, self.spend_limit.as_ref())
    }
}

use crate::types::permission::PermissionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Grant,
    Revoke,
}

/// Immutable historical record of a grant or revoke action, as delivered by
/// the history indexer. Append-only from the engine's perspective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermissionEvent {
    pub id: String,
    pub event_type: EventType,
    pub dapp_name: String,
    pub dapp_url: String,
    pub permission_type: PermissionType,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
}

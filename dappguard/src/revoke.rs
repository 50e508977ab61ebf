//! Single and bulk revocation workflows. Bulk runs strictly sequentially,
//! one wallet call in flight at a time: a failed identifier is tallied and
//! never aborts its siblings, and total latency scales linearly with batch
//! size. In-flight membership is tracked so affected entries can render as
//! busy, and is cleared unconditionally when the call resolves.

use crate::toast::ToastChannel;
use crate::wallet::WalletProvider;
use dashmap::DashSet;
use lib::types::permission::Permission;
use lib::types::wallet::WalletError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The session's working permission collection, shared with the composition
/// layer. Mutated only here (on successful revocation) and on refresh.
pub type PermissionSet = Arc<RwLock<Vec<Permission>>>;

const REVOKE_FALLBACK_MESSAGE: &str = "Failed to revoke permission";

/// Partial-failure accounting for one bulk revocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RevokeOutcome {
    pub success: usize,
    pub failed: usize,
}

/// Drives revocations against the wallet capability and keeps the permission
/// collection and notification channel in sync with their outcomes.
#[derive(Clone)]
pub struct Revoker {
    wallet: Arc<dyn WalletProvider>,
    permissions: PermissionSet,
    revoking: Arc<DashSet<String>>,
    toasts: ToastChannel,
}

impl Revoker {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        permissions: PermissionSet,
        toasts: ToastChannel,
    ) -> Self {
        Revoker {
            wallet,
            permissions,
            revoking: Arc::new(DashSet::new()),
            toasts,
        }
    }

    /// Identifiers currently mid-flight, for busy-state rendering.
    pub fn revoking_ids(&self) -> Vec<String> {
        self.revoking.iter().map(|id| id.clone()).collect()
    }

    pub fn is_revoking(&self, permission_id: &str) -> bool {
        self.revoking.contains(permission_id)
    }

    /// Whether any revocation is in flight. The composition layer disables
    /// bulk actions while this holds; the orchestrator itself does not guard
    /// against reentrant bulk calls.
    pub fn any_in_flight(&self) -> bool {
        !self.revoking.is_empty()
    }

    /// Revoke a single permission. On success the permission leaves the
    /// working set and a success toast is emitted; on failure it stays and
    /// the failure's message is surfaced. Returns whether it succeeded.
    pub async fn revoke(&self, permission_id: &str) -> bool {
        self.revoking.insert(permission_id.to_string());

        let result = self.wallet.revoke_permission(permission_id).await;
        match &result {
            Ok(()) => {
                self.remove_permission(permission_id).await;
                debug!("revoked permission {permission_id}");
                self.toasts.success("Permission revoked successfully");
            }
            Err(error) => {
                warn!("failed to revoke permission {permission_id}: {error}");
                self.toasts.error(failure_message(error));
            }
        }

        self.revoking.remove(permission_id);
        result.is_ok()
    }

    /// Revoke a batch of permissions, strictly one at a time. All ids are
    /// marked in-flight up front; each success removes its permission
    /// immediately; the working set is cleared in one step afterwards. One
    /// summary toast is emitted for the whole batch, never one per item.
    pub async fn revoke_many(&self, permission_ids: &[String]) -> RevokeOutcome {
        for id in permission_ids {
            self.revoking.insert(id.clone());
        }

        let mut outcome = RevokeOutcome::default();
        for id in permission_ids {
            match self.wallet.revoke_permission(id).await {
                Ok(()) => {
                    self.remove_permission(id).await;
                    outcome.success += 1;
                }
                Err(error) => {
                    warn!("failed to revoke permission {id}: {error}");
                    outcome.failed += 1;
                }
            }
        }

        self.revoking.clear();

        if outcome.failed == 0 {
            self.toasts.success(format!(
                "Successfully revoked {} permission(s)",
                outcome.success
            ));
        } else {
            self.toasts.warning(format!(
                "Revoked {}, failed {}",
                outcome.success, outcome.failed
            ));
        }

        outcome
    }

    async fn remove_permission(&self, permission_id: &str) {
        self.permissions
            .write()
            .await
            .retain(|p| p.id != permission_id);
    }
}

/// Human-readable message for a revocation failure, with a generic fallback
/// when the underlying error carries no message of its own.
fn failure_message(error: &WalletError) -> String {
    match error {
        WalletError::Rpc { error } | WalletError::RevokeFailed { error }
            if error.trim().is_empty() =>
        {
            REVOKE_FALLBACK_MESSAGE.to_string()
        }
        other => other.to_string(),
    }
}

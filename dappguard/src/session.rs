//! Composition root for one dashboard session: wallet connection state, the
//! working permission collection, the event history, the active filter
//! query, and the revocation orchestrator wired over all of them.
//!
//! Persistence of the last-connected address and the filter state is the
//! embedder's concern; the session only accepts an initial [`FilterState`]
//! and exposes the current one.

use crate::filter;
use crate::history::HistoryProvider;
use crate::revoke::{PermissionSet, Revoker};
use crate::stats;
use crate::toast::ToastChannel;
use crate::wallet::WalletProvider;
use lib::types::dashboard::{DashboardStats, FilterState};
use lib::types::history::PermissionEvent;
use lib::types::permission::{Permission, PermissionType, RiskLevel};
use lib::types::wallet::{WalletEvent, WalletState};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const NOT_INSTALLED_MESSAGE: &str =
    "Wallet extension is not installed. Please install it to continue.";

pub struct WalletSession {
    wallet: Arc<dyn WalletProvider>,
    history: Arc<dyn HistoryProvider>,
    toasts: ToastChannel,
    state: RwLock<WalletState>,
    permissions: PermissionSet,
    events: RwLock<Vec<PermissionEvent>>,
    filters: RwLock<FilterState>,
    revoker: Revoker,
}

impl WalletSession {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        history: Arc<dyn HistoryProvider>,
        toasts: ToastChannel,
        initial_filters: FilterState,
    ) -> Self {
        let permissions: PermissionSet = Arc::new(RwLock::new(Vec::new()));
        let revoker = Revoker::new(wallet.clone(), permissions.clone(), toasts.clone());
        WalletSession {
            wallet,
            history,
            toasts,
            state: RwLock::new(WalletState::default()),
            permissions,
            events: RwLock::new(Vec::new()),
            filters: RwLock::new(initial_filters),
            revoker,
        }
    }

    /// The shared notification channel, for the presentation layer to
    /// subscribe to.
    pub fn toasts(&self) -> &ToastChannel {
        &self.toasts
    }

    /// The revocation orchestrator bound to this session's permission set.
    pub fn revoker(&self) -> &Revoker {
        &self.revoker
    }

    pub async fn state(&self) -> WalletState {
        self.state.read().await.clone()
    }

    /// Request wallet access. A missing extension is a call-to-action, not a
    /// fault: it is surfaced as an error toast and recorded on the session
    /// state. Returns whether the session ended up connected.
    pub async fn connect(&self) -> bool {
        if !self.wallet.is_available() {
            self.toasts.error(NOT_INSTALLED_MESSAGE);
            let mut state = self.state.write().await;
            state.error = Some("Wallet not installed".to_string());
            return false;
        }

        {
            let mut state = self.state.write().await;
            state.is_connecting = true;
            state.error = None;
        }

        match self.wallet.connect().await {
            Ok(address) => {
                debug!("wallet connected as {address}");
                *self.state.write().await = WalletState {
                    address: Some(address),
                    is_connected: true,
                    is_connecting: false,
                    chain_id: None,
                    error: None,
                };
                self.toasts.success("Wallet connected successfully!");
                true
            }
            Err(error) => {
                warn!("wallet connect failed: {error}");
                let mut state = self.state.write().await;
                state.is_connecting = false;
                state.error = Some(error.to_string());
                self.toasts.error(error.to_string());
                false
            }
        }
    }

    pub async fn disconnect(&self) {
        self.wallet.disconnect().await;
        *self.state.write().await = WalletState::default();
        self.permissions.write().await.clear();
        self.events.write().await.clear();
        self.toasts.success("Wallet disconnected");
    }

    /// Fold an account or chain notification from the wallet into the
    /// session state. An account change to `None` ends the session.
    pub async fn apply_event(&self, event: WalletEvent) {
        match event {
            WalletEvent::AccountChanged(Some(address)) => {
                let mut state = self.state.write().await;
                state.address = Some(address);
                state.is_connected = true;
            }
            WalletEvent::AccountChanged(None) => {
                *self.state.write().await = WalletState::default();
            }
            WalletEvent::ChainChanged(chain_id) => {
                self.state.write().await.chain_id = Some(chain_id);
            }
        }
    }

    /// Reload the permission collection from the wallet. Consuming the set
    /// without a connected account is defined to yield an empty collection,
    /// never an error.
    pub async fn refresh_permissions(&self) {
        if !self.state.read().await.is_connected {
            self.permissions.write().await.clear();
            return;
        }

        match self.wallet.get_permissions().await {
            Ok(data) => {
                debug!("loaded {} permissions", data.len());
                *self.permissions.write().await = data;
                self.state.write().await.error = None;
            }
            Err(error) => {
                warn!("failed to fetch permissions: {error}");
                self.state.write().await.error = Some(error.to_string());
                self.toasts.error(error.to_string());
            }
        }
    }

    /// Reload the event history. Failures degrade gracefully: the previous
    /// events stay, nothing is toasted, and risk state is untouched.
    pub async fn refresh_history(&self) {
        let address = match self.state.read().await.address.clone() {
            Some(address) => address,
            None => {
                self.events.write().await.clear();
                return;
            }
        };

        match self.history.permission_history(&address).await {
            Ok(data) => {
                *self.events.write().await = data;
            }
            Err(error) => {
                warn!("history fetch degraded: {error}");
            }
        }
    }

    /// Prepend a newly observed event from the live history feed.
    pub async fn push_event(&self, event: PermissionEvent) {
        self.events.write().await.insert(0, event);
    }

    pub async fn permissions(&self) -> Vec<Permission> {
        self.permissions.read().await.clone()
    }

    pub async fn events(&self) -> Vec<PermissionEvent> {
        self.events.read().await.clone()
    }

    pub async fn filters(&self) -> FilterState {
        self.filters.read().await.clone()
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.filters.write().await.search_query = query.into();
    }

    pub async fn set_risk_level(&self, risk_level: Option<RiskLevel>) {
        self.filters.write().await.risk_level = risk_level;
    }

    pub async fn set_permission_type(&self, permission_type: Option<PermissionType>) {
        self.filters.write().await.permission_type = permission_type;
    }

    pub async fn clear_filters(&self) {
        *self.filters.write().await = FilterState::default();
    }

    pub async fn has_active_filters(&self) -> bool {
        self.filters.read().await.is_active()
    }

    /// The permission collection narrowed by the current filter query.
    pub async fn filtered_permissions(&self) -> Vec<Permission> {
        let permissions = self.permissions.read().await;
        let filters = self.filters.read().await;
        filter::apply(&permissions, &filters)
    }

    /// Aggregate exposure over the current permissions and history.
    pub async fn stats(&self) -> DashboardStats {
        let permissions = self.permissions.read().await;
        let events = self.events.read().await;
        stats::dashboard_stats(&permissions, &events)
    }
}

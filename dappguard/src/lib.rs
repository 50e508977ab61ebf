//! Engine behind the dApp permission dashboard: deterministic risk
//! classification and aggregation, a composable filter pipeline, a
//! process-wide toast channel, and the single/bulk revocation orchestrator.
//!
//! The engine owns no transport and renders nothing. The wallet extension and
//! the history indexer are consumed behind the [`wallet::WalletProvider`] and
//! [`history::HistoryProvider`] traits; presentation reads classified and
//! filtered permission lists, aggregate stats, the live toast list, and
//! in-flight revocation membership.

pub mod filter;
pub mod history;
pub mod revoke;
pub mod risk;
pub mod session;
pub mod stats;
pub mod toast;
pub mod wallet;

pub use lib::types::dashboard::{DashboardStats, FilterState};
pub use lib::types::history::{EventType, PermissionEvent};
pub use lib::types::permission::{
    AccessLevel, Permission, PermissionType, RiskLevel, SpendLimit,
};
pub use lib::types::toast::{Toast, ToastKind};
pub use lib::types::wallet::{WalletError, WalletEvent, WalletState};

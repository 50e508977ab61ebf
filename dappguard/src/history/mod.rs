//! The event-history collaborator. Failures here degrade gracefully: the
//! dashboard keeps working with an empty or stale history and the permission
//! and risk state is never touched.

use async_trait::async_trait;
use lib::types::history::PermissionEvent;
use lib::types::wallet::HistoryError;
use tokio::sync::mpsc;

pub mod demo;

pub use demo::DemoIndexer;

/// Capability surface of the grant/revoke event indexer.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Historical grant/revoke events for an address, newest first.
    async fn permission_history(
        &self,
        address: &str,
    ) -> Result<Vec<PermissionEvent>, HistoryError>;

    /// Live feed of newly observed events for an address. Dropping the
    /// receiver ends the subscription.
    fn subscribe(&self, address: &str) -> mpsc::Receiver<PermissionEvent>;
}

//! The wallet-extension collaborator. The engine talks to it exclusively
//! through [`WalletProvider`]; any failure it reports is recoverable, never
//! fatal to the session.

use async_trait::async_trait;
use lib::types::permission::Permission;
use lib::types::wallet::{WalletError, WalletEvent};
use tokio::sync::mpsc;

pub mod convert;
pub mod demo;

pub use demo::DemoWallet;

/// Capability surface of the browser wallet extension.
///
/// Account and chain change notifications arrive on the receiver returned by
/// [`WalletProvider::subscribe_events`]; dropping the receiver unsubscribes.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether the extension is installed and reachable at all.
    fn is_available(&self) -> bool;

    /// Request account access. Resolves to the selected account address.
    async fn connect(&self) -> Result<String, WalletError>;

    /// The wallet has no real disconnect call; implementations only drop
    /// local session state.
    async fn disconnect(&self);

    /// Retrieve the wallet's current grants, already converted into
    /// [`Permission`] records.
    async fn get_permissions(&self) -> Result<Vec<Permission>, WalletError>;

    /// Withdraw one grant by its identifier.
    async fn revoke_permission(&self, permission_id: &str) -> Result<(), WalletError>;

    /// Subscribe to account and chain change notifications.
    fn subscribe_events(&self) -> mpsc::Receiver<WalletEvent>;
}

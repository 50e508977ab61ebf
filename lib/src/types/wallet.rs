use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection state of the browser-wallet session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    pub address: Option<String>,
    pub is_connected: bool,
    pub is_connecting: bool,
    pub chain_id: Option<u64>,
    /// Last user-facing failure, if any. Cleared on the next attempt.
    pub error: Option<String>,
}

/// Notifications pushed by the wallet extension while a session is open.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum WalletEvent {
    /// The selected account changed; `None` means the wallet disconnected us.
    AccountChanged(Option<String>),
    ChainChanged(u64),
}

/// One grant as the wallet extension reports it, before conversion into a
/// [`crate::types::permission::Permission`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawPermission {
    pub parent_capability: String,
    #[serde(default)]
    pub caveats: Vec<Caveat>,
    /// Grant time in milliseconds since the epoch, when the wallet knows it.
    pub date: Option<u64>,
    pub invoker: Option<String>,
}

/// A restriction attached to a raw grant. The value shape depends on the
/// caveat type, so it is kept as raw JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Caveat {
    #[serde(rename = "type")]
    pub caveat_type: String,
    pub value: serde_json::Value,
}

#[derive(Clone, Debug, Error, Eq, PartialEq, Serialize, Deserialize)]
pub enum WalletError {
    #[error("wallet extension is not installed")]
    NotInstalled,
    #[error("no accounts found")]
    NoAccounts,
    #[error("wallet request failed: {error}")]
    Rpc { error: String },
    #[error("failed to revoke permission: {error}")]
    RevokeFailed { error: String },
}

impl WalletError {
    pub fn kind(&self) -> &str {
        match *self {
            WalletError::NotInstalled => "NotInstalled",
            WalletError::NoAccounts => "NoAccounts",
            WalletError::Rpc { .. } => "Rpc",
            WalletError::RevokeFailed { .. } => "RevokeFailed",
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq, Serialize, Deserialize)]
pub enum HistoryError {
    #[error("failed to fetch permission history: {error}")]
    Fetch { error: String },
}

impl HistoryError {
    pub fn kind(&self) -> &str {
        match *self {
            HistoryError::Fetch { .. } => "Fetch",
        }
    }
}

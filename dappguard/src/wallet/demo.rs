//! Showcase wallet used when no real extension is reachable: a fixed
//! account, six representative grants across the risk spectrum, and
//! revocations that always succeed after a short simulated delay.

use crate::wallet::WalletProvider;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use lib::types::permission::{AccessLevel, Permission, PermissionType, SpendLimit};
use lib::types::wallet::{WalletError, WalletEvent};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

const DEMO_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const REVOKE_DELAY_MS: u64 = 1_000;

/// In-memory stand-in for the browser extension.
pub struct DemoWallet {
    event_senders: Mutex<Vec<mpsc::Sender<WalletEvent>>>,
}

impl Default for DemoWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoWallet {
    pub fn new() -> Self {
        DemoWallet {
            event_senders: Mutex::new(Vec::new()),
        }
    }

    /// Push a wallet event to every live subscriber, pruning closed ones.
    pub fn emit(&self, event: WalletEvent) {
        let mut senders = self.event_senders.lock().expect("event sender lock poisoned");
        senders.retain(|sender| sender.try_send(event.clone()).is_ok());
    }

    /// The six showcase grants: two unbounded spenders, one high-limit and
    /// one low-limit bounded write, one bare write, one read-only.
    pub fn demo_permissions() -> Vec<Permission> {
        let now = Utc::now();
        let one_week_ago = now - Duration::days(7);
        let two_weeks_ago = now - Duration::days(14);
        let one_month_ago = now - Duration::days(30);

        vec![
            Permission {
                id: "1".to_string(),
                dapp_name: "Uniswap".to_string(),
                dapp_url: "https://app.uniswap.org".to_string(),
                dapp_icon: Some("🦄".to_string()),
                permission_type: PermissionType::Spend,
                access_level: AccessLevel::Unlimited,
                spend_limit: None,
                granted_at: one_week_ago,
                expires_at: None,
            },
            Permission {
                id: "2".to_string(),
                dapp_name: "OpenSea".to_string(),
                dapp_url: "https://opensea.io".to_string(),
                dapp_icon: Some("🌊".to_string()),
                permission_type: PermissionType::Write,
                access_level: AccessLevel::Write,
                spend_limit: Some(SpendLimit {
                    amount: "500".to_string(),
                    token: "USDC".to_string(),
                    token_address: "0xa0b8...".to_string(),
                }),
                granted_at: two_weeks_ago,
                expires_at: Some(now + Duration::days(7)),
            },
            Permission {
                id: "3".to_string(),
                dapp_name: "Aave".to_string(),
                dapp_url: "https://app.aave.com".to_string(),
                dapp_icon: Some("👻".to_string()),
                permission_type: PermissionType::Spend,
                access_level: AccessLevel::Write,
                spend_limit: Some(SpendLimit {
                    amount: "2000".to_string(),
                    token: "ETH".to_string(),
                    token_address: "0x0000...".to_string(),
                }),
                granted_at: one_month_ago,
                expires_at: None,
            },
            Permission {
                id: "4".to_string(),
                dapp_name: "Etherscan".to_string(),
                dapp_url: "https://etherscan.io".to_string(),
                dapp_icon: Some("🔍".to_string()),
                permission_type: PermissionType::Read,
                access_level: AccessLevel::Readonly,
                spend_limit: None,
                granted_at: one_month_ago,
                expires_at: None,
            },
            Permission {
                id: "5".to_string(),
                dapp_name: "Compound".to_string(),
                dapp_url: "https://compound.finance".to_string(),
                dapp_icon: Some("🏦".to_string()),
                permission_type: PermissionType::Write,
                access_level: AccessLevel::Write,
                spend_limit: None,
                granted_at: two_weeks_ago,
                expires_at: None,
            },
            Permission {
                id: "6".to_string(),
                dapp_name: "Curve Finance".to_string(),
                dapp_url: "https://curve.fi".to_string(),
                dapp_icon: Some("📈".to_string()),
                permission_type: PermissionType::Spend,
                access_level: AccessLevel::Unlimited,
                spend_limit: None,
                granted_at: one_week_ago,
                expires_at: None,
            },
        ]
    }
}

#[async_trait]
impl WalletProvider for DemoWallet {
    fn is_available(&self) -> bool {
        true
    }

    async fn connect(&self) -> Result<String, WalletError> {
        Ok(DEMO_ADDRESS.to_string())
    }

    async fn disconnect(&self) {}

    async fn get_permissions(&self) -> Result<Vec<Permission>, WalletError> {
        Ok(Self::demo_permissions())
    }

    async fn revoke_permission(&self, permission_id: &str) -> Result<(), WalletError> {
        // simulated extension round-trip
        tokio::time::sleep(tokio::time::Duration::from_millis(REVOKE_DELAY_MS)).await;
        debug!("demo wallet revoked permission {permission_id}");
        Ok(())
    }

    fn subscribe_events(&self) -> mpsc::Receiver<WalletEvent> {
        let (sender, receiver) = mpsc::channel(16);
        self.event_senders
            .lock()
            .expect("event sender lock poisoned")
            .push(sender);
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::types::permission::RiskLevel;

    #[test]
    fn test_demo_set_spans_all_risk_tiers() {
        let permissions = DemoWallet::demo_permissions();
        assert_eq!(permissions.len(), 6);

        let tiers: Vec<RiskLevel> = permissions.iter().map(|p| p.risk_level()).collect();
        assert_eq!(
            tiers,
            vec![
                RiskLevel::Dangerous, // Uniswap, unlimited spend
                RiskLevel::Moderate,  // OpenSea, 500 USDC cap
                RiskLevel::Dangerous, // Aave, 2000 ETH cap
                RiskLevel::Safe,      // Etherscan, read-only
                RiskLevel::Moderate,  // Compound, bare write
                RiskLevel::Dangerous, // Curve, unlimited spend
            ]
        );
    }

    #[tokio::test]
    async fn test_emitted_events_reach_subscribers() {
        let wallet = DemoWallet::new();
        let mut events = wallet.subscribe_events();

        wallet.emit(WalletEvent::ChainChanged(1));
        wallet.emit(WalletEvent::AccountChanged(None));

        assert_eq!(events.recv().await, Some(WalletEvent::ChainChanged(1)));
        assert_eq!(events.recv().await, Some(WalletEvent::AccountChanged(None)));
    }
}

//! Showcase history feed: a generated backlog of grant/revoke events over
//! the past month, plus a sparse live stream of new ones. Stands in for the
//! real indexer's GraphQL API and websocket subscription.

use crate::history::HistoryProvider;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use lib::types::history::{EventType, PermissionEvent};
use lib::types::permission::PermissionType;
use lib::types::wallet::HistoryError;
use rand::Rng;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

const BACKLOG_EVENTS: usize = 15;
const BACKLOG_WINDOW_DAYS: i64 = 30;
/// How often the live feed wakes up, and the chance it emits when it does.
const LIVE_POLL_SECS: u64 = 30;
const LIVE_EVENT_CHANCE: f64 = 0.1;

const DEMO_DAPPS: &[(&str, &str)] = &[
    ("Uniswap", "https://app.uniswap.org"),
    ("OpenSea", "https://opensea.io"),
    ("Aave", "https://app.aave.com"),
    ("Compound", "https://compound.finance"),
    ("Curve", "https://curve.fi"),
    ("SushiSwap", "https://sushi.com"),
];

const PERMISSION_TYPES: &[PermissionType] = &[
    PermissionType::Read,
    PermissionType::Write,
    PermissionType::Spend,
];

/// In-memory stand-in for the indexer. The backlog is generated once and
/// then served unchanged, so repeated fetches are stable within a session.
pub struct DemoIndexer {
    backlog: Mutex<Option<Vec<PermissionEvent>>>,
}

impl Default for DemoIndexer {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoIndexer {
    pub fn new() -> Self {
        DemoIndexer {
            backlog: Mutex::new(None),
        }
    }

    fn generate_backlog() -> Vec<PermissionEvent> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        let mut events: Vec<PermissionEvent> = (0..BACKLOG_EVENTS)
            .map(|i| {
                let (dapp_name, dapp_url) = DEMO_DAPPS[rng.gen_range(0..DEMO_DAPPS.len())];
                let days_ago = rng.gen_range(0..BACKLOG_WINDOW_DAYS);
                PermissionEvent {
                    id: format!("event-{i}"),
                    event_type: if rng.gen_bool(0.7) {
                        EventType::Grant
                    } else {
                        EventType::Revoke
                    },
                    dapp_name: dapp_name.to_string(),
                    dapp_url: dapp_url.to_string(),
                    permission_type: PERMISSION_TYPES[rng.gen_range(0..PERMISSION_TYPES.len())],
                    timestamp: now - Duration::days(days_ago),
                    transaction_hash: random_tx_hash(&mut rng),
                }
            })
            .collect();

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }
}

fn random_tx_hash(rng: &mut impl Rng) -> String {
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for _ in 0..32 {
        hash.push_str(&format!("{:02x}", rng.gen::<u8>()));
    }
    hash
}

#[async_trait]
impl HistoryProvider for DemoIndexer {
    async fn permission_history(
        &self,
        address: &str,
    ) -> Result<Vec<PermissionEvent>, HistoryError> {
        debug!("fetching demo history for {address}");
        let mut backlog = self.backlog.lock().expect("backlog lock poisoned");
        Ok(backlog.get_or_insert_with(Self::generate_backlog).clone())
    }

    fn subscribe(&self, address: &str) -> mpsc::Receiver<PermissionEvent> {
        debug!("subscribing to demo events for {address}");
        let (sender, receiver) = mpsc::channel(16);

        tokio::spawn(async move {
            let mut counter: u64 = 0;
            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(LIVE_POLL_SECS)).await;
                counter += 1;

                let event = {
                    let mut rng = rand::thread_rng();
                    if !rng.gen_bool(LIVE_EVENT_CHANCE) {
                        continue;
                    }
                    let (dapp_name, dapp_url) = DEMO_DAPPS[rng.gen_range(0..3)];
                    PermissionEvent {
                        id: format!("event-live-{counter}"),
                        event_type: if rng.gen_bool(0.5) {
                            EventType::Grant
                        } else {
                            EventType::Revoke
                        },
                        dapp_name: dapp_name.to_string(),
                        dapp_url: dapp_url.to_string(),
                        permission_type: PermissionType::Write,
                        timestamp: Utc::now(),
                        transaction_hash: random_tx_hash(&mut rng),
                    }
                };

                if sender.send(event).await.is_err() {
                    // receiver dropped, subscription over
                    break;
                }
            }
        });

        receiver
    }
}

//! Process-wide store of transient status messages with subscriber fan-out.
//! An explicit handle passed around at composition time, not a global: every
//! clone of [`ToastChannel`] shares the same toast list and subscriber set.

use dashmap::DashMap;
use lib::types::toast::{Toast, ToastKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::time::Duration;
use tracing::debug;

type Callback = Box<dyn Fn(&[Toast]) + Send + Sync + 'static>;

struct ChannelInner {
    toasts: Mutex<Vec<Toast>>,
    subscribers: DashMap<u64, Callback>,
    next_toast_id: AtomicU64,
    next_subscriber_id: AtomicU64,
}

/// Cloneable handle to the shared toast store.
#[derive(Clone)]
pub struct ToastChannel {
    inner: Arc<ChannelInner>,
}

impl Default for ToastChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration handle returned by [`ToastChannel::subscribe`]. Dropping it
/// unregisters the callback.
pub struct ToastSubscription {
    id: u64,
    channel: Weak<ChannelInner>,
}

impl Drop for ToastSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.channel.upgrade() {
            inner.subscribers.remove(&self.id);
        }
    }
}

impl ToastChannel {
    pub fn new() -> Self {
        ToastChannel {
            inner: Arc::new(ChannelInner {
                toasts: Mutex::new(Vec::new()),
                subscribers: DashMap::new(),
                next_toast_id: AtomicU64::new(0),
                next_subscriber_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Error, message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Warning, message, None)
    }

    /// Loading toasts have no lifetime timer: the caller must dismiss them
    /// once the awaited operation concludes.
    pub fn loading(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Loading, message, None)
    }

    /// Publish a toast, optionally overriding the kind's default lifetime.
    /// Returns the new toast's identifier.
    pub fn show(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration_ms: Option<u64>,
    ) -> String {
        let seq = self.inner.next_toast_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("toast-{seq}");
        let toast = Toast {
            id: id.clone(),
            kind,
            message: message.into(),
            duration_ms,
        };

        self.inner
            .toasts
            .lock()
            .expect("toast list lock poisoned")
            .push(toast);
        self.notify();

        let lifetime = match kind {
            ToastKind::Loading => None,
            _ => duration_ms.or(kind.auto_dismiss_ms()),
        };
        if let Some(ms) = lifetime {
            // the timer needs a runtime; without one the toast simply stays
            // up until dismissed explicitly
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let channel = Arc::downgrade(&self.inner);
                let timer_id = id.clone();
                handle.spawn(async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    if let Some(inner) = channel.upgrade() {
                        ToastChannel { inner }.dismiss(&timer_id);
                    }
                });
            } else {
                debug!("toast {id} published outside a runtime, no lifetime timer");
            }
        }

        id
    }

    /// Remove a toast by identifier. Unknown identifiers are a no-op.
    pub fn dismiss(&self, toast_id: &str) {
        let removed = {
            let mut toasts = self.inner.toasts.lock().expect("toast list lock poisoned");
            let before = toasts.len();
            toasts.retain(|t| t.id != toast_id);
            toasts.len() < before
        };
        if removed {
            self.notify();
        }
    }

    /// Snapshot of the current toast list, in insertion order.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner
            .toasts
            .lock()
            .expect("toast list lock poisoned")
            .clone()
    }

    /// Register a callback that receives the full toast list immediately and
    /// again after every mutation.
    pub fn subscribe(
        &self,
        callback: impl Fn(&[Toast]) + Send + Sync + 'static,
    ) -> ToastSubscription {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.subscribers.insert(id, Box::new(callback));

        let snapshot = self.toasts();
        if let Some(callback) = self.inner.subscribers.get(&id) {
            callback(&snapshot);
        }

        ToastSubscription {
            id,
            channel: Arc::downgrade(&self.inner),
        }
    }

    fn notify(&self) {
        let snapshot = self.toasts();
        for entry in self.inner.subscribers.iter() {
            entry.value()(&snapshot);
        }
    }
}

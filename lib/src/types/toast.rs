use serde::{Deserialize, Serialize};

/// How long each toast kind stays up before auto-dismissing, in milliseconds.
pub const SUCCESS_DURATION_MS: u64 = 5_000;
pub const WARNING_DURATION_MS: u64 = 6_000;
pub const ERROR_DURATION_MS: u64 = 7_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Loading,
}

impl ToastKind {
    /// Default lifetime before auto-dismissal. Loading toasts have none:
    /// the caller must dismiss them once the awaited operation concludes.
    pub fn auto_dismiss_ms(&self) -> Option<u64> {
        match self {
            ToastKind::Success => Some(SUCCESS_DURATION_MS),
            ToastKind::Warning => Some(WARNING_DURATION_MS),
            ToastKind::Error => Some(ERROR_DURATION_MS),
            ToastKind::Loading => None,
        }
    }
}

/// A transient user notification. Owned exclusively by the toast channel and
/// destroyed when its lifetime timer fires or it is explicitly dismissed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    /// Explicit lifetime override, if one was supplied at creation.
    pub duration_ms: Option<u64>,
}

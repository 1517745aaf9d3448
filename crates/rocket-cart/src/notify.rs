//! User-facing notifications.
//!
//! Every failed cart operation produces exactly one [`Toast`]. Presentation
//! code decides how to show it by supplying a [`Notifier`].

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// What a toast reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    /// The requested quantity is not in stock.
    OutOfStock,
    /// Any other failure.
    Failure,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn out_of_stock(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::OutOfStock,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Failure,
            message: message.into(),
        }
    }
}

/// Receives toasts from the cart store.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Buffers toasts until presentation code drains them.
#[derive(Debug, Default)]
pub struct NotificationLog {
    toasts: Mutex<Vec<Toast>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered toasts, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copy of the buffered toasts.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

/// Emits each toast as a `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        tracing::warn!(kind = ?toast.kind, "{}", toast.message);
    }
}

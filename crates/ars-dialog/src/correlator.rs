//! Hands a gateway delivery to the turn that is waiting for it.
//!
//! The turn handler subscribes on the conversation key before it calls the
//! gateway; the delivery callback, arriving as an unrelated request,
//! publishes on the same key and wakes it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::error::DialogError;

enum Signal<T> {
    Delivered(T),
    Superseded,
}

/// Single-waiter, one-shot publish/subscribe keyed by conversation.
pub struct MessageCorrelator<T> {
    waiters: Mutex<HashMap<String, oneshot::Sender<Signal<T>>>>,
}

impl<T> Default for MessageCorrelator<T> {
    fn default() -> Self {
        Self {
            waiters: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Send> MessageCorrelator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the waiter for `key`. An earlier, unresolved waiter for the
    /// same key is replaced, and it is woken with
    /// [`DialogError::Superseded`] rather than left to run into its timeout.
    pub fn subscribe_once(&self, key: &str) -> Subscription<T> {
        let (tx, rx) = oneshot::channel();
        let previous = self.lock().insert(key.to_string(), tx);
        if let Some(previous) = previous {
            tracing::warn!(key, "replacing an unresolved delivery waiter");
            let _ = previous.send(Signal::Superseded);
        }
        Subscription {
            key: key.to_string(),
            rx,
        }
    }

    /// Resolve the waiter for `key`. Returns `false` when nobody is waiting,
    /// in which case the payload is dropped.
    pub fn publish(&self, key: &str, payload: T) -> bool {
        let Some(tx) = self.lock().remove(key) else {
            return false;
        };
        tx.send(Signal::Delivered(payload)).is_ok()
    }

    /// Drop the waiter for `key`, if any.
    pub fn cancel(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            tracing::debug!(key, "delivery waiter cancelled");
        }
    }

    pub fn is_waiting(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, oneshot::Sender<Signal<T>>>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A pending delivery for one conversation key.
pub struct Subscription<T> {
    key: String,
    rx: oneshot::Receiver<Signal<T>>,
}

impl<T> Subscription<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Wait for the delivery.
    pub async fn recv(self) -> Result<T, DialogError> {
        match self.rx.await {
            Ok(Signal::Delivered(payload)) => Ok(payload),
            Ok(Signal::Superseded) => Err(DialogError::Superseded { key: self.key }),
            Err(_) => Err(DialogError::Cancelled { key: self.key }),
        }
    }
}

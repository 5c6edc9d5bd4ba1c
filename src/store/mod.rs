use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod memory;
pub mod sqlite;

/// Callback invoked with the changed key after every successful write.
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Unified key-value access trait. Every persisted engagement entry goes
/// through here.
/// Implementations: `SqliteStore` (wraps rusqlite/r2d2) and `MemoryStore`
/// (plain process-local map).
pub trait KvStore: Send + Sync {
    /// Value stored under `key`, or `None` when the entry is absent or the
    /// backend is unavailable.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or replace the value under `key`. Notifies subscribers with the
    /// key name after a successful write.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Register a change listener. Returns a token for `unsubscribe`.
    /// Listeners receive only the changed key; they re-read whatever state
    /// they care about.
    fn subscribe(&self, listener: ChangeListener) -> u64;

    /// Drop a previously registered listener. Unknown tokens are ignored.
    fn unsubscribe(&self, token: u64);

    /// Value under `key` parsed as a decimal integer, or 0 when absent or
    /// unparseable.
    fn get_i64(&self, key: &str) -> i64 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

/// Decode the JSON blob under `key`. An absent entry, an unavailable backend,
/// and malformed JSON all read as `T::default()`.
pub fn get_json_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    store
        .get(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Serialize `value` and store it under `key`.
pub fn set_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw)
}

/// Listener registry shared by the store backends. Listeners run outside the
/// lock, so a callback may write back into the store without deadlocking.
pub(crate) struct Subscribers {
    next_token: AtomicU64,
    listeners: Mutex<Vec<(u64, ChangeListener)>>,
}

impl Subscribers {
    pub(crate) fn new() -> Self {
        Subscribers {
            next_token: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, listener: ChangeListener) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().push((token, listener));
        token
    }

    pub(crate) fn remove(&self, token: u64) {
        self.listeners.lock().unwrap().retain(|(t, _)| *t != token);
    }

    pub(crate) fn notify(&self, key: &str) {
        let current: Vec<ChangeListener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in current {
            listener(key);
        }
    }
}

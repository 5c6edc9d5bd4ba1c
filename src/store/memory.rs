use std::collections::HashMap;
use std::sync::Mutex;

use super::{ChangeListener, KvStore, Subscribers};

/// In-memory KvStore backend. Entries live for the lifetime of the process;
/// used by tests and by embedders that do not want persistence.
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            data: Mutex::new(HashMap::new()),
            subscribers: Subscribers::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.subscribers.notify(key);
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> u64 {
        self.subscribers.add(listener)
    }

    fn unsubscribe(&self, token: u64) {
        self.subscribers.remove(token);
    }
}

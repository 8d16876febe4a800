//! Key-value storage with browser-like scoping.
//!
//! A [`SharedStorage`] is the durable store every browsing context of the
//! client sees. Each context attaches a [`ContextStore`] view to it; writes
//! through a view are broadcast as [`StorageEvent`]s to every *other*
//! context. Tab-scoped storage is a plain [`MemoryStore`] nobody else sees.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::warn;

const EVENT_CAPACITY: usize = 64;

/// Minimal storage capability the session layer needs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Used for the tab scope and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Identity of one browsing context (tab/window) attached to shared storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

/// Notification that another context changed the shared store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub origin: ContextId,
    pub key: String,
    pub new_value: Option<String>,
}

struct SharedInner {
    entries: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
    next_context: AtomicU64,
}

/// Durable store shared by every attached context.
#[derive(Clone)]
pub struct SharedStorage {
    inner: Arc<SharedInner>,
}

impl SharedStorage {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SharedInner {
                entries: RwLock::new(HashMap::new()),
                events,
                next_context: AtomicU64::new(1),
            }),
        }
    }

    /// Opens a new context view; each call stands for a new tab.
    pub fn attach(&self) -> ContextStore {
        let id = ContextId(self.inner.next_context.fetch_add(1, Ordering::Relaxed));
        ContextStore {
            id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SharedStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// One context's handle on [`SharedStorage`].
#[derive(Clone)]
pub struct ContextStore {
    id: ContextId,
    inner: Arc<SharedInner>,
}

impl ContextStore {
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Registers a listener for changes made by other contexts.
    /// Dropping the returned value deregisters it.
    pub fn subscribe(&self) -> StorageEvents {
        StorageEvents {
            own: self.id,
            rx: self.inner.events.subscribe(),
        }
    }

    fn publish(&self, key: &str, new_value: Option<&str>) {
        // no subscribers is fine
        let _ = self.inner.events.send(StorageEvent {
            origin: self.id,
            key: key.to_string(),
            new_value: new_value.map(str::to_string),
        });
    }
}

impl KeyValueStore for ContextStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let previous = self
            .inner
            .entries
            .write()
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.publish(key, Some(value));
        }
    }

    fn remove(&self, key: &str) {
        let previous = self.inner.entries.write().remove(key);
        if previous.is_some() {
            self.publish(key, None);
        }
    }
}

/// Stream of storage changes made by other contexts.
pub struct StorageEvents {
    own: ContextId,
    rx: broadcast::Receiver<StorageEvent>,
}

impl StorageEvents {
    /// Waits for the next foreign change. `None` once the storage is gone.
    ///
    /// A lagged receiver still reports a change: the events it missed are
    /// gone, but the caller only needs to know that something moved.
    pub async fn changed(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.own => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Storage listener lagged, {missed} events dropped");
                    return Some(StorageEvent {
                        origin: self.own,
                        key: String::new(),
                        new_value: None,
                    });
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// Client-held session: storage scopes, persistence, and cross-context events.

pub mod storage;
pub mod store;

pub use storage::{ContextStore, KeyValueStore, MemoryStore, SharedStorage, StorageEvent, StorageEvents};
pub use store::{Scope, Session, SessionStore};

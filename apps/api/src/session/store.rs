//! In-memory session store.
//!
//! Sessions live for the duration of an edit and are never persisted here;
//! durable storage is the external API's job. The map is shared across
//! handlers through `AppState`, behind a `tokio::sync::RwLock` so reads
//! (preview) do not serialize behind writes (ops).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::binder::EditSession;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, EditSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: EditSession) -> Uuid {
        let id = session.id;
        self.inner.write().await.insert(id, session);
        id
    }

    /// Snapshot of a session. Callers render or serialize from the clone so
    /// the lock is released before any slow work.
    pub async fn get(&self, id: Uuid) -> Option<EditSession> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Runs `f` against a session under the write lock. Returns `None` when
    /// the session does not exist.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut EditSession) -> T) -> Option<T> {
        self.inner.write().await.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

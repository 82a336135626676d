use std::sync::Arc;

use crate::persistence::PersistenceApi;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live edit sessions, in-memory only.
    pub sessions: SessionStore,
    /// Storage API seam. `HttpPersistence` in production, swapped for an
    /// in-memory mock in handler tests.
    pub persistence: Arc<dyn PersistenceApi>,
}

use std::sync::Arc;

use storage::EntityStore;

/// Shared handler state: the Entity Store behind a trait object so the
/// Postgres and in-memory backends are interchangeable.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: impl EntityStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }
}

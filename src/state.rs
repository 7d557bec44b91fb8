use sqlx::SqlitePool;
use std::sync::Arc;

use crate::gateway::broadcaster::Broadcaster;
use crate::gateway::registry::Registry;
use crate::store::alerts::AlertStore;
use crate::store::visitors::VisitorStore;

/// Everything handlers need, cloned per request. Explicitly constructed (no
/// globals), so tests can run any number of independent instances.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub registry: Arc<Registry>,
    pub broadcaster: Broadcaster,
    pub alerts: AlertStore,
    pub visitors: VisitorStore,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let registry = Arc::new(Registry::new());
        Self {
            broadcaster: Broadcaster::new(Arc::clone(&registry)),
            registry,
            alerts: AlertStore::new(db.clone()),
            visitors: VisitorStore::new(db.clone()),
            db,
        }
    }
}

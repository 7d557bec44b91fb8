use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::db;
use crate::error::AppError;
use crate::models::visitor::{CreateVisitor, VisitorLog, VisitorStatus};

/// Visitor check-in and presence log. Rows are created at check-in and
/// updated on presence changes, never deleted.
#[derive(Clone)]
pub struct VisitorStore {
    pool: SqlitePool,
    notify: broadcast::Sender<Vec<VisitorLog>>,
}

impl VisitorStore {
    pub fn new(pool: SqlitePool) -> Self {
        let (notify, _) = broadcast::channel(super::SNAPSHOT_CHANNEL_CAPACITY);
        Self { pool, notify }
    }

    /// Register a visitor: status Online, `last_seen` now.
    pub async fn check_in(&self, create: CreateVisitor) -> Result<VisitorLog, AppError> {
        let visitor = db::visitors::insert_visitor(&self.pool, &create).await?;
        self.publish().await;
        Ok(visitor)
    }

    /// Refresh `last_seen` only.
    pub async fn touch(&self, visitor_id: &str) -> Result<VisitorLog, AppError> {
        let visitor = db::visitors::touch_visitor(&self.pool, visitor_id).await?;
        self.publish().await;
        Ok(visitor)
    }

    pub async fn set_status(
        &self,
        visitor_id: &str,
        status: VisitorStatus,
    ) -> Result<VisitorLog, AppError> {
        let visitor = db::visitors::set_visitor_status(&self.pool, visitor_id, status).await?;
        self.publish().await;
        Ok(visitor)
    }

    pub async fn get(&self, visitor_id: &str) -> Result<VisitorLog, AppError> {
        db::visitors::get_visitor_row(&self.pool, visitor_id).await
    }

    /// Most recently seen first.
    pub async fn list(&self) -> Result<Vec<VisitorLog>, AppError> {
        db::visitors::list_visitors(&self.pool).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Vec<VisitorLog>> {
        self.notify.subscribe()
    }

    async fn publish(&self) {
        match db::visitors::list_visitors(&self.pool).await {
            Ok(snapshot) => {
                let _ = self.notify.send(snapshot);
            }
            Err(e) => tracing::error!("failed to load visitor snapshot: {e:?}"),
        }
    }
}

use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::db;
use crate::error::AppError;
use crate::models::alert::{CreateAlert, SosAlert};

/// Append-only store of emergency alerts, independent of the broadcast path.
///
/// The store, not the gateway, assigns each alert's id and timestamp at
/// append time. Two receivers that append the same logical alert produce two
/// rows; nothing here deduplicates.
#[derive(Clone)]
pub struct AlertStore {
    pool: SqlitePool,
    notify: broadcast::Sender<Vec<SosAlert>>,
}

impl AlertStore {
    pub fn new(pool: SqlitePool) -> Self {
        let (notify, _) = broadcast::channel(super::SNAPSHOT_CHANNEL_CAPACITY);
        Self { pool, notify }
    }

    pub async fn append(&self, create: CreateAlert) -> Result<SosAlert, AppError> {
        let alert = db::alerts::insert_alert(&self.pool, &create).await?;
        self.publish().await;
        Ok(alert)
    }

    /// Newest-first point query.
    pub async fn list(&self) -> Result<Vec<SosAlert>, AppError> {
        db::alerts::list_alerts(&self.pool).await
    }

    pub async fn get(&self, alert_id: &str) -> Result<SosAlert, AppError> {
        db::alerts::get_alert_row(&self.pool, alert_id).await
    }

    /// Subscribe to snapshot pushes. Every append delivers the full
    /// newest-first list. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<SosAlert>> {
        self.notify.subscribe()
    }

    async fn publish(&self) {
        match db::alerts::list_alerts(&self.pool).await {
            Ok(snapshot) => {
                // No receivers is fine.
                let _ = self.notify.send(snapshot);
            }
            Err(e) => tracing::error!("failed to load alert snapshot: {e:?}"),
        }
    }
}

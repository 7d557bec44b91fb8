use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::alert::{CreateAlert, SosAlert};
use crate::snowflake;

fn row_to_alert(row: sqlx::sqlite::SqliteRow) -> SosAlert {
    SosAlert {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        wallet_address: row.get("wallet_address"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

const SELECT_ALERTS: &str =
    "SELECT id, name, email, wallet_address, message, created_at FROM sos_alerts";

pub async fn insert_alert(pool: &SqlitePool, create: &CreateAlert) -> Result<SosAlert, AppError> {
    let id = snowflake::generate();
    let created_at = crate::db::now_rfc3339();

    sqlx::query(
        "INSERT INTO sos_alerts (id, name, email, wallet_address, message, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&create.name)
    .bind(&create.email)
    .bind(&create.wallet_address)
    .bind(&create.message)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(SosAlert {
        id,
        name: create.name.clone(),
        email: create.email.clone(),
        wallet_address: create.wallet_address.clone(),
        message: create.message.clone(),
        created_at,
    })
}

/// Newest-first, matching what subscribers see on every change.
pub async fn list_alerts(pool: &SqlitePool) -> Result<Vec<SosAlert>, AppError> {
    let rows = sqlx::query(&format!(
        "{SELECT_ALERTS} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_alert).collect())
}

pub async fn get_alert_row(pool: &SqlitePool, alert_id: &str) -> Result<SosAlert, AppError> {
    let row = sqlx::query(&format!("{SELECT_ALERTS} WHERE id = ?"))
        .bind(alert_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("unknown_alert".to_string()))?;

    Ok(row_to_alert(row))
}

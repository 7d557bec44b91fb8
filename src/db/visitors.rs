use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::visitor::{CreateVisitor, VisitorLog, VisitorStatus};
use crate::snowflake;

fn row_to_visitor(row: sqlx::sqlite::SqliteRow) -> VisitorLog {
    let status: String = row.get("status");
    VisitorLog {
        id: row.get("id"),
        name: row.get("name"),
        aadhar: row.get("aadhar"),
        phone: row.get("phone"),
        address: row.get("address"),
        email: row.get("email"),
        last_seen: row.get("last_seen"),
        status: VisitorStatus::parse(&status).unwrap_or(VisitorStatus::Online),
    }
}

const SELECT_VISITORS: &str =
    "SELECT id, name, aadhar, phone, address, email, last_seen, status FROM visitor_logs";

pub async fn insert_visitor(
    pool: &SqlitePool,
    create: &CreateVisitor,
) -> Result<VisitorLog, AppError> {
    let id = snowflake::generate();
    let last_seen = crate::db::now_rfc3339();

    sqlx::query(
        "INSERT INTO visitor_logs (id, name, aadhar, phone, address, email, last_seen, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&create.name)
    .bind(&create.aadhar)
    .bind(&create.phone)
    .bind(&create.address)
    .bind(&create.email)
    .bind(&last_seen)
    .bind(VisitorStatus::Online.as_str())
    .execute(pool)
    .await?;

    Ok(VisitorLog {
        id,
        name: create.name.clone(),
        aadhar: create.aadhar.clone(),
        phone: create.phone.clone(),
        address: create.address.clone(),
        email: create.email.clone(),
        last_seen,
        status: VisitorStatus::Online,
    })
}

pub async fn get_visitor_row(pool: &SqlitePool, visitor_id: &str) -> Result<VisitorLog, AppError> {
    let row = sqlx::query(&format!("{SELECT_VISITORS} WHERE id = ?"))
        .bind(visitor_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("unknown_visitor".to_string()))?;

    Ok(row_to_visitor(row))
}

/// Refresh `last_seen` without touching the status.
pub async fn touch_visitor(pool: &SqlitePool, visitor_id: &str) -> Result<VisitorLog, AppError> {
    let last_seen = crate::db::now_rfc3339();
    let result = sqlx::query("UPDATE visitor_logs SET last_seen = ? WHERE id = ?")
        .bind(&last_seen)
        .bind(visitor_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("unknown_visitor".to_string()));
    }

    get_visitor_row(pool, visitor_id).await
}

/// Status transition; also refreshes `last_seen`.
pub async fn set_visitor_status(
    pool: &SqlitePool,
    visitor_id: &str,
    status: VisitorStatus,
) -> Result<VisitorLog, AppError> {
    let last_seen = crate::db::now_rfc3339();
    let result = sqlx::query("UPDATE visitor_logs SET status = ?, last_seen = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(&last_seen)
        .bind(visitor_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("unknown_visitor".to_string()));
    }

    get_visitor_row(pool, visitor_id).await
}

/// Most recently seen first, the order the dashboard renders.
pub async fn list_visitors(pool: &SqlitePool) -> Result<Vec<VisitorLog>, AppError> {
    let rows = sqlx::query(&format!(
        "{SELECT_VISITORS} ORDER BY last_seen DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_visitor).collect())
}

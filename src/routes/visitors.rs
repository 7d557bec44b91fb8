use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use futures_util::stream::Stream;

use crate::error::AppError;
use crate::models::visitor::{CreateVisitor, UpdateVisitor, VisitorLog};
use crate::state::AppState;

use super::stream::snapshot_sse;

pub async fn check_in(
    State(state): State<AppState>,
    Json(body): Json<CreateVisitor>,
) -> Result<(StatusCode, Json<VisitorLog>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let visitor = state.visitors.check_in(body).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

pub async fn list_visitors(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitorLog>>, AppError> {
    Ok(Json(state.visitors.list().await?))
}

/// Presence update. With a `status` this transitions online/offline; either
/// way `last_seen` is refreshed.
pub async fn update_visitor(
    State(state): State<AppState>,
    Path(visitor_id): Path<String>,
    Json(body): Json<UpdateVisitor>,
) -> Result<Json<VisitorLog>, AppError> {
    let visitor = match body.status {
        Some(status) => state.visitors.set_status(&visitor_id, status).await?,
        None => state.visitors.touch(&visitor_id).await?,
    };
    Ok(Json(visitor))
}

pub async fn stream_visitors(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let rx = state.visitors.subscribe();
    let initial = state.visitors.list().await?;
    Ok(snapshot_sse("visitors", initial, rx))
}

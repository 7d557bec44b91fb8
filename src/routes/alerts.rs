use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use futures_util::stream::Stream;

use crate::error::AppError;
use crate::models::alert::{CreateAlert, SosAlert};
use crate::state::AppState;

use super::stream::snapshot_sse;

/// Append one alert. The store assigns the id and timestamp here, at the
/// moment of receipt — the gateway's broadcast path never touches this.
pub async fn append_alert(
    State(state): State<AppState>,
    Json(body): Json<CreateAlert>,
) -> Result<(StatusCode, Json<SosAlert>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let alert = state.alerts.append(body).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<SosAlert>>, AppError> {
    Ok(Json(state.alerts.list().await?))
}

/// Newest-first snapshot stream: dashboards use this to reconcile alerts
/// missed while their live connection was down.
pub async fn stream_alerts(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let rx = state.alerts.subscribe();
    let initial = state.alerts.list().await?;
    Ok(snapshot_sse("alerts", initial, rx))
}

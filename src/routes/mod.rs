mod alerts;
mod gateway;
mod health;
mod stream;
mod visitors;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .route("/ws", get(crate::gateway::ws_upgrade))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/gateway", get(gateway::get_gateway))
        .route("/alerts", post(alerts::append_alert).get(alerts::list_alerts))
        .route("/alerts/stream", get(alerts::stream_alerts))
        .route(
            "/visitors",
            post(visitors::check_in).get(visitors::list_visitors),
        )
        .route("/visitors/stream", get(visitors::stream_visitors))
        .route("/visitors/{visitor_id}", patch(visitors::update_visitor))
}

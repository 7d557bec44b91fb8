use axum::Json;

/// Discovery document: where clients should open their event channel.
pub async fn get_gateway() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": {
            "url": "/ws",
            "encoding": "json"
        }
    }))
}

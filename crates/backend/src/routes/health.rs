use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "total_entries": state.webhooks.read().await.len(),
        "total_logs": state.action_logs.read().await.len(),
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    models::{ApiError, ChatRequest},
    state::AppState,
};

pub async fn send_chat(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: ChatRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Message is required"))?;
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let preview: String = request.message.chars().take(50).collect();
    info!(preview = %preview, "chat message received");

    match state.relay.send_chat(&request.message).await {
        Ok((response, raw)) => Ok(Json(json!({
            "success": true,
            "response": response,
            "data": raw,
        }))),
        Err(e) => {
            warn!(%e, "chat forward failed");
            Err(ApiError::new(e.status(), e.to_string()))
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/chat", post(send_chat))
}

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    models::{ActionLogEntry, ActionRequest, ApiError, Page, PageQuery},
    state::AppState,
};

/// Forward an operator approve/reject action to the automation service.
/// Every attempt lands in the action log, failures included.
pub async fn submit_action(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: ActionRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid action payload: {e}")))?;

    info!(
        action = %payload.action,
        item_id = ?payload.item_id,
        "submitting action"
    );

    let result = state.relay.submit_action(&payload).await;

    let entry = ActionLogEntry {
        id: state.next_id(),
        timestamp: Utc::now(),
        request: payload.clone(),
        success: result.is_ok(),
        response: result.as_ref().ok().cloned(),
        error: result.as_ref().err().map(|e| e.to_string()),
    };
    state.action_logs.write().await.push(entry);

    match result {
        Ok(data) => {
            info!(action = %payload.action, "action submitted");
            Ok(Json(json!({
                "success": true,
                "message": format!("Action {} submitted successfully", payload.action),
                "data": data,
            })))
        }
        Err(e) => {
            warn!(action = %payload.action, %e, "action submission failed");
            Err(ApiError::new(e.status(), e.to_string()))
        }
    }
}

pub async fn list_action_logs(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Json<Page<ActionLogEntry>> {
    let (offset, limit) = params.sanitize();
    let (data, total) = state.action_logs.read().await.page(offset, limit);

    info!(offset, limit, total, "listing action logs");
    Json(Page::new(data, total, offset, limit))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/submit-action", post(submit_action))
        .route("/api/price-change-logs", get(list_action_logs))
}

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::{error, info};

use crate::{
    models::{ApiError, Page, PageQuery, WebhookEntry},
    state::AppState,
};

/// Inbound webhook receiver. The body is taken as-is: JSON when it parses,
/// raw string otherwise, so misbehaving senders still get recorded.
pub async fn receive_webhook(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let body_value: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into()))
    };

    let header_map: serde_json::Map<String, Value> = headers
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|s| (k.to_string(), Value::String(s.to_string())))
        })
        .collect();

    let remote_addr = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let entry = WebhookEntry {
        id: state.next_id(),
        timestamp: Utc::now(),
        method: method.to_string(),
        headers: Value::Object(header_map),
        body: body_value,
        query: serde_json::to_value(query).unwrap_or(Value::Null),
        remote_addr,
    };

    let id = entry.id;
    let timestamp = entry.timestamp;
    info!(id, method = %entry.method, remote_addr = %entry.remote_addr, "webhook received");

    state.webhooks.write().await.push(entry);

    Json(json!({
        "success": true,
        "message": "Webhook received successfully",
        "id": id,
        "timestamp": timestamp,
    }))
}

pub async fn list_webhooks(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Json<Page<WebhookEntry>> {
    let (offset, limit) = params.sanitize();
    let (data, total) = state.webhooks.read().await.page(offset, limit);

    info!(offset, limit, total, "listing webhook entries");
    Json(Page::new(data, total, offset, limit))
}

pub async fn get_webhook(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let log = state.webhooks.read().await;
    match log.get_by_id(id) {
        Some(entry) => Ok(Json(json!({ "success": true, "data": entry }))),
        None => Err(ApiError::not_found("Webhook entry not found")),
    }
}

pub async fn clear_webhooks(State(state): State<AppState>) -> Json<Value> {
    let count = state.webhooks.write().await.clear();
    info!(count, "cleared webhook entries");

    Json(json!({
        "success": true,
        "message": format!("Cleared {count} webhook entries"),
    }))
}

/// Server-side pull from the remote snapshot endpoint, so the dashboard
/// never talks to the automation service directly.
pub async fn fetch_snapshot(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.relay.fetch_snapshot().await {
        Ok(data) => Ok(Json(json!({ "success": true, "data": data }))),
        Err(e) => {
            error!(%e, "snapshot fetch failed");
            Err(ApiError::new(e.status(), e.to_string()))
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/webhook/receive", post(receive_webhook))
        .route("/api/webhooks", get(list_webhooks).delete(clear_webhooks))
        .route("/api/webhooks/:id", get(get_webhook))
        .route("/api/fetch-webhook", get(fetch_snapshot))
}

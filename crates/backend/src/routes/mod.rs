use axum::Router;

use crate::state::AppState;

pub mod actions;
pub mod chat;
pub mod health;
pub mod webhooks;

/// Full API surface, without the static dashboard page or middleware
/// layers (main adds those).
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(webhooks::routes())
        .merge(actions::routes())
        .merge(chat::routes())
        .merge(health::routes())
}

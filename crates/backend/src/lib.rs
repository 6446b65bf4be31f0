pub mod config;
pub mod history;
pub mod models;
pub mod relay;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use state::AppState;

use axum::Router;

/// The API router with state attached, as served by the binary (minus the
/// static dashboard page and middleware, which main layers on).
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

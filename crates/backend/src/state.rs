use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::history::BoundedLog;
use crate::models::{ActionLogEntry, WebhookEntry};
use crate::relay::RelayClient;

/// Shared service state handed to every handler. Both logs live in process
/// memory only; restarting the service empties them.
#[derive(Clone)]
pub struct AppState {
    pub webhooks: Arc<RwLock<BoundedLog<WebhookEntry>>>,
    pub action_logs: Arc<RwLock<BoundedLog<ActionLogEntry>>>,
    pub relay: RelayClient,
    next_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            webhooks: Arc::new(RwLock::new(BoundedLog::new(config.history.webhook_capacity))),
            action_logs: Arc::new(RwLock::new(BoundedLog::new(
                config.history.action_log_capacity,
            ))),
            relay: RelayClient::new(config.relay.clone())?,
            // Seeded from wall-clock millis so ids stay roughly sortable
            // across restarts, then incremented per entry so they never
            // collide within a process.
            next_id: Arc::new(AtomicU64::new(Utc::now().timestamp_millis() as u64)),
        })
    }

    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let state = AppState::new(&Config::default()).unwrap();
        let a = state.next_id();
        let b = state.next_id();
        let c = state.next_id();

        assert!(a < b && b < c);
    }
}

use std::fmt;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::models::ActionRequest;

const USER_AGENT: &str = "hookboard-dashboard/1.0";

/// Cloudflare's "origin is unreachable" status, which the automation
/// service fronts its inactive workflows with.
const STATUS_ORIGIN_UNREACHABLE: u16 = 530;

/// Outbound forwarder for operator actions, chat messages and snapshot
/// pulls. One fixed endpoint per concern; every call is bounded by a
/// timeout and never retried.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: RelayConfig,
}

/// Remote-call failures, classified into the categories the dashboard
/// surfaces to operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// 404 from the remote: endpoint missing or workflow inactive.
    NotFound,
    /// 530 or a refused connection: the remote is down or unreachable.
    Unavailable,
    /// Any other 5xx from the remote.
    Upstream(u16),
    /// The call exceeded its timeout.
    Timeout,
    /// Any other non-2xx status.
    Rejected(u16),
    /// Transport-level failure that is none of the above.
    Transport(String),
}

impl RelayError {
    /// Status code this failure maps to on our side of the proxy.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::NotFound => StatusCode::NOT_FOUND,
            RelayError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Rejected(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::NotFound => write!(
                f,
                "Remote webhook not found (404). Make sure the endpoint URL is \
                 correct and the automation workflow is active."
            ),
            RelayError::Unavailable => write!(
                f,
                "Remote webhook server is down or unreachable. The automation \
                 workflow may not be active or the server is experiencing issues."
            ),
            RelayError::Upstream(status) => write!(
                f,
                "Remote webhook server error ({status}). The server is experiencing issues."
            ),
            RelayError::Timeout => write!(
                f,
                "Connection timeout. The remote webhook took too long to respond."
            ),
            RelayError::Rejected(status) => write!(f, "Remote webhook returned {status}."),
            RelayError::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RelayError {}

/// Map a non-2xx remote status to its user-facing category.
fn classify_status(status: u16) -> RelayError {
    match status {
        404 => RelayError::NotFound,
        STATUS_ORIGIN_UNREACHABLE => RelayError::Unavailable,
        s if s >= 500 => RelayError::Upstream(s),
        s => RelayError::Rejected(s),
    }
}

fn classify_transport(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else if err.is_connect() {
        RelayError::Unavailable
    } else {
        RelayError::Transport(err.to_string())
    }
}

/// Remote replies are JSON when possible, raw text otherwise.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into()))
}

/// Chat replies arrive in several shapes; reduce them to something
/// printable for the dashboard.
pub(crate) fn normalize_chat_reply(raw: &Value) -> Value {
    if raw.is_string() {
        return raw.clone();
    }
    for key in ["response", "message", "data"] {
        if let Some(inner) = raw.get(key) {
            return inner.clone();
        }
    }
    if raw.is_object() {
        return Value::String(serde_json::to_string_pretty(raw).unwrap_or_default());
    }
    raw.clone()
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Forward an operator action to the fixed action endpoint.
    pub async fn submit_action(&self, payload: &ActionRequest) -> Result<Value, RelayError> {
        let response = self
            .client
            .post(&self.config.action_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(action = %payload.action, status = %status, "action forward rejected");
            return Err(classify_status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(classify_transport)?;
        Ok(decode_body(&bytes))
    }

    /// Forward a chat message; returns the normalized reply plus the raw one.
    pub async fn send_chat(&self, message: &str) -> Result<(Value, Value), RelayError> {
        let response = self
            .client
            .post(&self.config.chat_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.config.chat_timeout())
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "chat forward rejected");
            return Err(classify_status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(classify_transport)?;
        let raw = decode_body(&bytes);
        Ok((normalize_chat_reply(&raw), raw))
    }

    /// Pull the current snapshot from the remote. The endpoint expects a
    /// POST; some deployments only answer GET, so fall back on a 4xx/5xx.
    pub async fn fetch_snapshot(&self) -> Result<Value, RelayError> {
        let mut response = self
            .client
            .post(&self.config.snapshot_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({}))
            .send()
            .await
            .map_err(classify_transport)?;

        if response.status().as_u16() >= 400 {
            info!(status = %response.status(), "snapshot POST rejected, retrying as GET");
            response = self
                .client
                .get(&self.config.snapshot_url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(classify_transport)?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(classify_transport)?;
        Ok(decode_body(&bytes))
    }
}

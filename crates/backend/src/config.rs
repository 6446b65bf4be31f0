use color_eyre::eyre::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the dashboard page served at `/`.
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Remote endpoint polled by the proxy-fetch route.
    pub snapshot_url: String,
    /// Remote endpoint receiving operator approve/reject actions.
    pub action_url: String,
    /// Remote endpoint receiving chat messages.
    pub chat_url: String,
    pub request_timeout_secs: u64,
    pub chat_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub webhook_capacity: usize,
    pub action_log_capacity: usize,
}

impl RelayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                static_dir: PathBuf::from("static"),
            },
            relay: RelayConfig {
                snapshot_url: "https://automation.example.com/webhook/snapshot".to_string(),
                action_url: "https://automation.example.com/webhook/actions".to_string(),
                chat_url: "https://automation.example.com/webhook/chat".to_string(),
                request_timeout_secs: 10,
                chat_timeout_secs: 30,
            },
            history: HistoryConfig {
                webhook_capacity: 1000,
                action_log_capacity: 500,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file("hookboard.yaml"))
            .merge(Env::prefixed("HOOKBOARD_").split("__"))
            .extract()?;

        Ok(config)
    }
}

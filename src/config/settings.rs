//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, ID_STRATEGY_SEQUENTIAL,
    LOG_FORMAT_JSON,
};

/// Which identifier strategy the store is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    Uuid,
    Sequential,
}

impl From<&str> for IdStrategy {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            ID_STRATEGY_SEQUENTIAL => IdStrategy::Sequential,
            _ => IdStrategy::Uuid,
        }
    }
}

/// Argon2 work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub id_strategy: IdStrategy,
    pub hashing: HashingConfig,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            id_strategy: IdStrategy::Uuid,
            hashing: HashingConfig::default(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            id_strategy: env::var("ID_STRATEGY")
                .map(|v| IdStrategy::from(v.as_str()))
                .unwrap_or(defaults.id_strategy),
            hashing: HashingConfig {
                memory_kib: parse_var("ARGON2_MEMORY_KIB").unwrap_or(defaults.hashing.memory_kib),
                iterations: parse_var("ARGON2_ITERATIONS").unwrap_or(defaults.hashing.iterations),
                parallelism: parse_var("ARGON2_PARALLELISM")
                    .unwrap_or(defaults.hashing.parallelism),
            },
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case(LOG_FORMAT_JSON))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Per-request timeout applied by the HTTP layer.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

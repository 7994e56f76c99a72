//! Agent connection settings.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `IOTA_HOST` | `localhost` | Agent host name |
//! | `IOTA_PORT` | `4061` | Agent north port |
//! | `IOTA_TIMEOUT_MS` | `1000` | Per-request timeout |

use std::time::Duration;

use crate::error::ConfigError;

pub const HOST_VAR: &str = "IOTA_HOST";
pub const PORT_VAR: &str = "IOTA_PORT";
pub const TIMEOUT_VAR: &str = "IOTA_TIMEOUT_MS";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 4061;
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;

/// Where the agent lives and how long a call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AgentConfig {
    pub fn new(host: impl Into<String>, port: u16, timeout_ms: u64) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_ms,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source; unset variables
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR) {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::Empty { var: HOST_VAR });
            }
            config.host = host.to_owned();
        }

        if let Some(port) = lookup(PORT_VAR) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: PORT_VAR,
                    expected: "port number",
                    value: port.clone(),
                })?;
        }

        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            config.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: TIMEOUT_VAR,
                    expected: "number of milliseconds",
                    value: timeout.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

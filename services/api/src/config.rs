use std::net::SocketAddr;
use tracing::Level;
use whose_turn_core::{Roster, StateScope};

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub roster: Roster,
    pub scope: StateScope,
    pub application_id: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// This function will look for a `.env` file in the current directory
    /// and load the following variables:
    ///
    /// *   `BIND_ADDRESS`: The address and port to bind the server to. Defaults to "0.0.0.0:3000".
    /// *   `ROSTER`: Comma separated names taking turns. Defaults to "Odelia,Isaiah,Angela".
    /// *   `TURN_STATE_SCOPE`: "session" or "user". Defaults to "session".
    /// *   `SKILL_APPLICATION_ID`: (Optional) Only accept requests for this skill id.
    /// *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let roster = match lookup("ROSTER") {
            Some(list) => list
                .parse::<Roster>()
                .map_err(|e| ConfigError::InvalidValue("ROSTER".to_string(), e.to_string()))?,
            None => Roster::default(),
        };

        let scope = match lookup("TURN_STATE_SCOPE") {
            Some(scope) => scope
                .parse::<StateScope>()
                .map_err(|e| ConfigError::InvalidValue("TURN_STATE_SCOPE".to_string(), e))?,
            None => StateScope::default(),
        };

        // An empty value is treated the same as not setting it.
        let application_id = lookup("SKILL_APPLICATION_ID").filter(|id| !id.trim().is_empty());

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            roster,
            scope,
            application_id,
            log_level,
        })
    }
}

//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides (`PORT`) are applied after parsing, before
/// validation.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: ServerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides.
pub fn default_config() -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment variable overrides to a parsed configuration.
///
/// `PORT` replaces the port portion of the bind address, keeping the host.
fn apply_env_overrides(config: &mut ServerConfig) {
    if let Ok(port) = env::var(PORT_ENV) {
        if let Ok(port) = port.parse::<u16>() {
            config.listener.bind_address = override_port(&config.listener.bind_address, port);
        } else {
            tracing::warn!(value = %port, "Ignoring non-numeric PORT override");
        }
    }
}

/// Replace the port portion of a bind address, keeping the host.
fn override_port(bind_address: &str, port: u16) -> String {
    let host = bind_address.rsplit_once(':').map_or("0.0.0.0", |(host, _)| host);
    format!("{}:{}", host, port)
}

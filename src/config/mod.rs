//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal (or absent) configs
//! - Validation separates syntactic (serde) from semantic checks
//! - `PORT` env var overrides the listener port (container convention)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::ServerConfig;
pub use schema::{
    ClientIpConfig, GeoIpConfig, ListenerConfig, ObservabilityConfig, SpeedtestConfig,
    StaticFilesConfig, TimeoutConfig,
};

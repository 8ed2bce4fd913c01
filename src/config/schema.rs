//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static file serving settings.
    pub static_files: StaticFilesConfig,

    /// Client IP resolution settings.
    pub client_ip: ClientIpConfig,

    /// GeoIP database settings.
    pub geoip: GeoIpConfig,

    /// Speed-test payload settings.
    pub speedtest: SpeedtestConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory containing the static pages (index.html, about.html).
    pub directory: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            directory: "public".to_string(),
        }
    }
}

/// Client IP resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientIpConfig {
    /// Forwarding headers consulted in order before falling back to the
    /// socket peer address. Only meaningful behind a trusted proxy.
    pub trusted_headers: Vec<String>,
}

impl Default for ClientIpConfig {
    fn default() -> Self {
        Self {
            trusted_headers: vec!["x-forwarded-for".to_string(), "x-real-ip".to_string()],
        }
    }
}

/// GeoIP database configuration.
///
/// Both databases are optional; lookups degrade to a `null` location when
/// no database is loaded.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GeoIpConfig {
    /// Path to a GeoLite2-City mmdb file.
    pub city_db_path: Option<String>,

    /// Path to a GeoLite2-ASN mmdb file (enables the `org` field).
    pub asn_db_path: Option<String>,
}

/// Speed-test configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeedtestConfig {
    /// Size of the download payload in bytes.
    pub download_size_bytes: usize,

    /// Maximum accepted upload body size in bytes.
    pub upload_limit_bytes: u64,
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        Self {
            download_size_bytes: 5 * 1024 * 1024,
            upload_limit_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Generous by default so slow links can finish a download test.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 120 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

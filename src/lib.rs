//! Client connection info & speed test service library.

pub mod api;
pub mod config;
pub mod http;
pub mod lookup;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;

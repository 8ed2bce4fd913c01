//! Client lookup subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → ip.rs (proxy-aware client IP resolution)
//!     → geo.rs (IP → GeoRecord, local MaxMind dataset, miss = None)
//!     → agent.rs (User-Agent → AgentInfo, best-effort, never fails)
//! ```
//!
//! # Design Decisions
//! - Every lookup is a pure read against request data or an immutable
//!   dataset loaded at startup; no network calls, no caching
//! - A lookup miss is an expected outcome, never an error

pub mod agent;
pub mod geo;
pub mod ip;

pub use agent::{AgentInfo, UserAgentParser};
pub use geo::{GeoDatabase, GeoRecord};
pub use ip::resolve_client_ip;

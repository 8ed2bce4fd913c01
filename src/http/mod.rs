//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, static pages)
//!     → api handlers (client info, speed test, diagnostics)
//!     → response.rs (error kind → status code + JSON body)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer};

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS, security headers)
//! - Serve static pages from the configured directory
//! - Register the catch-all 404 handler last
//! - Bind server to listener and run with graceful shutdown

use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::config::ServerConfig;
use crate::http::response::ApiError;
use crate::lookup::{GeoDatabase, UserAgentParser};
use crate::observability::metrics;

/// Fill byte for the download payload; the content is never inspected by
/// clients, only timed.
const DOWNLOAD_FILL_BYTE: u8 = b'0';

/// Application state injected into handlers.
///
/// Everything here is immutable after startup and shared read-only, so
/// concurrent requests need no coordination.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub geo: Arc<GeoDatabase>,
    pub ua_parser: Arc<UserAgentParser>,
    /// Canonical download payload, allocated once and shared across
    /// requests; its length always equals the declared Content-Length.
    pub download_payload: Bytes,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let geo = Arc::new(GeoDatabase::open(&config.geoip));
        let ua_parser = Arc::new(UserAgentParser::new());
        let download_payload =
            Bytes::from(vec![DOWNLOAD_FILL_BYTE; config.speedtest.download_size_bytes]);

        let state = AppState {
            config: config.clone(),
            geo,
            ua_parser,
            download_payload,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all routes and middleware layers.
    ///
    /// The JSON 404 fallback is registered last so it only fires when no
    /// route (including the static services) matched.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let static_dir = Path::new(&config.static_files.directory);

        Router::new()
            .route("/api/myip", get(api::client_info::client_info))
            .route("/api/test", get(api::diagnostic))
            .route("/api/speedtest/ping", get(api::speedtest::ping))
            .route("/api/speedtest/download", get(api::speedtest::download))
            .route("/api/speedtest/upload", post(api::speedtest::upload))
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .route_service("/about", ServeFile::new(static_dir.join("about.html")))
            .nest_service("/static", ServeDir::new(static_dir))
            .fallback(api::not_found)
            .method_not_allowed_fallback(api::not_found)
            .with_state(state)
            .layer(
                // Top layer runs first on the way in, last on the way out.
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(axum::middleware::from_fn(metrics::track_request))
                    .layer(CatchPanicLayer::custom(handle_panic))
                    .layer(CorsLayer::permissive())
                    .layer(SetResponseHeaderLayer::if_not_present(
                        header::X_CONTENT_TYPE_OPTIONS,
                        HeaderValue::from_static("nosniff"),
                    ))
                    .layer(SetResponseHeaderLayer::if_not_present(
                        header::X_FRAME_OPTIONS,
                        HeaderValue::from_static("SAMEORIGIN"),
                    ))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.static_files.directory,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<std::net::SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Convert a handler panic into the uniform 500 JSON body.
/// The panic payload is logged, never echoed to the caller.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

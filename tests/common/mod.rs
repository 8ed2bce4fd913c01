//! Shared utilities for integration testing.

use std::net::SocketAddr;

use netinfo::{HttpServer, ServerConfig};
use tokio::net::TcpListener;

/// Start the service on an ephemeral port and return its address.
///
/// The server task lives for the duration of the test runtime.
pub async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// HTTP client that ignores any proxy configured in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

//! Client connection info endpoint (`GET /api/myip`).
//!
//! # Responsibilities
//! - Resolve the client IP (proxy-aware, socket fallback)
//! - Attach the optional geolocation record and best-effort agent info
//! - Echo connection facts, selected headers, and the raw request shape
//!
//! # Design Decisions
//! - Missing optional data never fails the request: geolocation misses
//!   serialize as `null`, absent headers as the literal `"N/A"`
//! - Field names are camelCase to match the public contract

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderMap, Uri};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::server::AppState;
use crate::lookup::{resolve_client_ip, AgentInfo, GeoRecord};

/// Literal substituted for absent optional headers.
const NOT_AVAILABLE: &str = "N/A";

/// Full response document for `GET /api/myip`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoResponse {
    pub success: bool,
    pub timestamp: String,
    pub ip_address: String,
    pub location: Option<GeoRecord>,
    pub user_agent: AgentInfo,
    pub connection: ConnectionInfo,
    pub headers: EchoedHeaders,
    pub raw_headers: Map<String, Value>,
    pub method: String,
    pub url: String,
    pub query: Map<String, Value>,
}

/// Protocol and origin facts taken directly from the request.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub secure: bool,
    pub protocol: String,
    pub host: String,
    pub origin: String,
}

/// The four individually echoed headers.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EchoedHeaders {
    pub accept_language: String,
    pub accept_encoding: String,
    pub connection: String,
    pub cache_control: String,
}

/// `GET /api/myip` — describe the caller.
pub async fn client_info(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Json<ClientInfoResponse> {
    let headers = request.headers();
    let ip = resolve_client_ip(headers, peer, &state.config.client_ip.trusted_headers);

    let user_agent = state.ua_parser.parse(
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    Json(ClientInfoResponse {
        success: true,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ip_address: ip.to_string(),
        location: state.geo.lookup(ip),
        user_agent,
        connection: connection_info(headers),
        headers: echoed_headers(headers),
        raw_headers: collect_raw_headers(headers),
        method: request.method().to_string(),
        url: request.uri().to_string(),
        query: parse_query(request.uri()),
    })
}

fn header_or_na(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn connection_info(headers: &HeaderMap) -> ConnectionInfo {
    // Behind a proxy the original scheme arrives in X-Forwarded-Proto;
    // the service itself only terminates plain HTTP.
    let protocol = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http")
        .to_ascii_lowercase();

    ConnectionInfo {
        secure: protocol == "https",
        protocol,
        host: header_or_na(headers, "host"),
        origin: header_or_na(headers, "origin"),
    }
}

fn echoed_headers(headers: &HeaderMap) -> EchoedHeaders {
    EchoedHeaders {
        accept_language: header_or_na(headers, "accept-language"),
        accept_encoding: header_or_na(headers, "accept-encoding"),
        connection: header_or_na(headers, "connection"),
        cache_control: header_or_na(headers, "cache-control"),
    }
}

/// Echo the complete header set in arrival order.
/// Repeated headers are joined with ", " under a single key.
fn collect_raw_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut raw = Map::new();
    for name in headers.keys() {
        // Injected by the request-ID middleware, not sent by the caller.
        if name.as_str() == "x-request-id" {
            continue;
        }
        let joined = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        raw.insert(name.as_str().to_string(), Value::String(joined));
    }
    raw
}

/// Parse the query string into a key → value map (last value wins).
fn parse_query(uri: &Uri) -> Map<String, Value> {
    let mut query = Map::new();
    for (key, value) in url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes()) {
        query.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    query
}

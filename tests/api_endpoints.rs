//! Integration tests for the info and diagnostic endpoints.

use netinfo::ServerConfig;
use serde_json::Value;

mod common;

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[tokio::test]
async fn myip_reports_caller_facts() {
    let addr = common::spawn_server(ServerConfig::default()).await;
    let client = common::client();

    let body: Value = client
        .get(format!("http://{}/api/myip?foo=bar&n=3", addr))
        .header("accept-language", "en-US,en;q=0.9")
        .header("user-agent", CHROME_UA)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["ipAddress"], "127.0.0.1");
    // No GeoIP database is configured, so the lookup misses: exactly null.
    assert_eq!(body["location"], Value::Null);
    assert_eq!(body["userAgent"]["browser"], "Chrome");
    assert_eq!(body["userAgent"]["os"], "Windows 10");
    assert_eq!(body["headers"]["acceptLanguage"], "en-US,en;q=0.9");
    assert_eq!(body["connection"]["protocol"], "http");
    assert_eq!(body["connection"]["secure"], false);
    assert_eq!(body["method"], "GET");
    assert_eq!(body["url"], "/api/myip?foo=bar&n=3");
    assert_eq!(body["query"]["foo"], "bar");
    assert_eq!(body["query"]["n"], "3");
    // Timestamp is RFC 3339 / ISO-8601.
    let ts = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn myip_missing_user_agent_resolves_to_sentinel() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/myip", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["userAgent"]["browser"], "UNKNOWN");
    assert_eq!(body["userAgent"]["os"], "UNKNOWN");
    assert_eq!(body["userAgent"]["device"], "UNKNOWN");
}

#[tokio::test]
async fn myip_absent_optional_headers_become_na() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/myip", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["headers"]["acceptLanguage"], "N/A");
    assert_eq!(body["headers"]["cacheControl"], "N/A");
    assert_eq!(body["connection"]["origin"], "N/A");
}

#[tokio::test]
async fn myip_trusts_forwarding_headers() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/myip", addr))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.2")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["ipAddress"], "203.0.113.7");
}

#[tokio::test]
async fn myip_echoes_raw_headers() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/myip", addr))
        .header("x-custom-probe", "42")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["rawHeaders"]["x-custom-probe"], "42");
    // The host header always arrives on HTTP/1.1.
    assert_eq!(body["rawHeaders"]["host"], format!("{}", addr));
}

#[tokio::test]
async fn myip_is_idempotent_modulo_timestamp() {
    let addr = common::spawn_server(ServerConfig::default()).await;
    let client = common::client();

    let mut first: Value = client
        .get(format!("http://{}/api/myip", addr))
        .header("user-agent", CHROME_UA)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mut second: Value = client
        .get(format!("http://{}/api/myip", addr))
        .header("user-agent", CHROME_UA)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    first.as_object_mut().unwrap().remove("timestamp");
    second.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(first, second);
}

#[tokio::test]
async fn diagnostic_endpoint_acknowledges() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let res = common::client()
        .get(format!("http://{}/api/test", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "API is working");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unmatched_route_returns_json_404() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let res = common::client()
        .get(format!("http://{}/nonexistent", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let text = res.text().await.unwrap();
    assert_eq!(text, r#"{"success":false,"error":"Endpoint not found"}"#);
}

#[tokio::test]
async fn unmatched_method_returns_json_404() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let res = common::client()
        .delete(format!("http://{}/api/unknown/deeper/path", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn static_pages_are_served() {
    let addr = common::spawn_server(ServerConfig::default()).await;
    let client = common::client();

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(res.text().await.unwrap().contains("netinfo"));

    let res = client.get(format!("http://{}/about", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("About"));
}

#[tokio::test]
async fn missing_static_page_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.static_files.directory = dir.path().to_str().unwrap().to_string();
    let addr = common::spawn_server(config).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn security_headers_are_present() {
    let addr = common::spawn_server(ServerConfig::default()).await;

    let res = common::client()
        .get(format!("http://{}/api/test", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "SAMEORIGIN");
    // Every response carries a request ID for correlation.
    assert!(res.headers().contains_key("x-request-id"));
}

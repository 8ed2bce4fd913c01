//! Proxy-aware client IP resolution.
//!
//! # Responsibilities
//! - Consult configured forwarding headers in order (X-Forwarded-For first)
//! - Take the leftmost entry of a comma-separated chain
//! - Fall back to the socket peer address when no header yields an IP
//!
//! # Design Decisions
//! - Header values that do not parse as an IP are skipped, not errored
//! - `ip:port` and bracketed IPv6 forms are tolerated (some proxies
//!   forward the full socket address)

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Resolve the originating client address for a request.
///
/// `trusted_headers` is checked in order; the first entry that parses as an
/// IP address wins. With no match the socket peer address is returned.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr, trusted_headers: &[String]) -> IpAddr {
    for name in trusted_headers {
        let Some(value) = headers.get(name.as_str()).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        // X-Forwarded-For is "client, proxy1, proxy2"; the leftmost entry
        // is the original client.
        let candidate = value.split(',').next().unwrap_or("").trim();
        if let Some(ip) = parse_ip(candidate) {
            return ip;
        }
    }
    peer.ip()
}

/// Parse a forwarded address, accepting bare IPs and `ip:port` forms.
fn parse_ip(value: &str) -> Option<IpAddr> {
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Some(ip);
    }
    // "1.2.3.4:5678" or "[::1]:5678"
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Some(addr.ip());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "10.0.0.1:54321".parse().unwrap()
    }

    fn trusted() -> Vec<String> {
        vec!["x-forwarded-for".to_string(), "x-real-ip".to_string()]
    }

    #[test]
    fn falls_back_to_peer_without_headers() {
        let headers = HeaderMap::new();
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn takes_leftmost_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.2, 10.0.0.3"),
        );
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn header_order_follows_configuration() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn skips_garbage_and_uses_next_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn accepts_socket_address_forms() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7:4412"));
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("[2001:db8::1]:443"));
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "2001:db8::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn ipv6_without_brackets() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("2001:db8::2"));
        let ip = resolve_client_ip(&headers, peer(), &trusted());
        assert_eq!(ip, "2001:db8::2".parse::<IpAddr>().unwrap());
    }
}

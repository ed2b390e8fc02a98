//! Shared utilities for integration tests: a programmable directions server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use route_comparator::config::ProviderConfig;

/// Query parameters of one request the mock received.
pub type Query = HashMap<String, String>;

/// Start a programmable directions server on an ephemeral port. `f` gets the
/// decoded query string and returns `(status, body)`.
pub async fn start_mock_directions<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(Query) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(query) = read_query(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(query).await;
                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_query(socket: &mut tokio::net::TcpStream) -> Option<Query> {
    let mut buf = Vec::with_capacity(2048);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head.lines().next()?.split_whitespace().nth(1)?.to_string();
    let url = url::Url::parse(&format!("http://mock{}", target)).ok()?;
    Some(url.query_pairs().into_owned().collect())
}

/// Provider config pointed at a mock server.
pub fn provider_config(addr: SocketAddr) -> ProviderConfig {
    ProviderConfig {
        base_url: format!("http://{}/maps/api/directions/json", addr),
        api_key: "test-key".to_string(),
        api_key_env: String::new(),
        request_timeout_secs: 2,
    }
}

/// An OK response with a single leg.
pub fn route_body(distance: &str, duration: &str, steps: usize) -> String {
    let steps: Vec<serde_json::Value> = (0..steps)
        .map(|i| serde_json::json!({ "html_instructions": format!("step {}", i) }))
        .collect();
    serde_json::json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": { "text": distance, "value": 0 },
                "duration": { "text": duration, "value": 0 },
                "steps": steps
            }]
        }]
    })
    .to_string()
}

/// A response carrying only a status token.
pub fn status_body(status: &str) -> String {
    serde_json::json!({ "status": status, "routes": [] }).to_string()
}

/// The waypoint a request was for, or "" for the readiness probe.
pub fn waypoint(query: &Query) -> String {
    query.get("waypoints").cloned().unwrap_or_default()
}

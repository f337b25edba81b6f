//! Loopback HTTP stub shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned response served for every request.
pub struct StubResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: String,
}

/// Running stub: base URL plus the heads of all requests it received.
pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    /// Request heads received so far, lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// What: Start a stub HTTP server answering every request with `response`.
///
/// Inputs:
/// - `response`: Status line and JSON body.
///
/// Output:
/// - `Stub` whose `base_url` ends in `/v3/places`.
///
/// Details:
/// - One request per connection (`Connection: close`); heads are recorded lowercased.
pub async fn serve(response: StubResponse) -> Stub {
    serve_raw(format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.body.len(),
        response.body
    ))
    .await
}

/// What: Start a stub HTTP server writing `reply` verbatim after each request head.
///
/// Inputs:
/// - `reply`: Complete HTTP response bytes, possibly inconsistent on purpose.
///
/// Output:
/// - `Stub` whose `base_url` ends in `/v3/places`.
pub async fn serve_raw(reply: String) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let reply = Arc::new(reply);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = Arc::clone(&seen);
            let reply = Arc::clone(&reply);
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                seen.lock()
                    .expect("requests lock")
                    .push(String::from_utf8_lossy(&head).to_lowercase());
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    Stub {
        base_url: format!("http://{addr}/v3/places"),
        requests,
    }
}

/// Base URL on a loopback port nothing listens on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/v3/places")
}

/// Nearby body with three items; the second has no geocode.
pub fn nearby_body_with_malformed_middle() -> String {
    serde_json::json!({
        "results": [
            {
                "name": "Blue Bottle",
                "geocodes": {"main": {"latitude": 37.7763, "longitude": -122.4232}},
                "location": {"formatted_address": "315 Linden St"},
                "categories": [{"name": "Coffee Shop"}]
            },
            {
                "name": "Ghost Kitchen",
                "location": {"formatted_address": "nowhere"}
            },
            {
                "name": "Tartine",
                "geocodes": {"main": {"latitude": 37.7614, "longitude": -122.4241}},
                "location": {"formatted_address": "600 Guerrero St"},
                "categories": [{"name": "Bakery"}, {"name": "Cafe"}]
            }
        ]
    })
    .to_string()
}

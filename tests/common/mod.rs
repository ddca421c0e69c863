//! Shared utilities for integration testing against a mock provider.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use txscope::config::ExplorerConfig;
use txscope::ExplorerClient;

/// Start a programmable mock provider on an ephemeral port.
///
/// `respond` receives the request target (path and query) and returns the
/// status code and body to answer with.
pub async fn start_programmable_provider<F>(respond: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    tokio::spawn(async move {
                        let mut request = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => request.extend_from_slice(&buf[..n]),
                            }
                        }

                        let request = String::from_utf8_lossy(&request);
                        let target = request
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = respond(&target);
                        let status_text = match status {
                            200 => "200 OK".to_string(),
                            404 => "404 Not Found".to_string(),
                            429 => "429 Too Many Requests".to_string(),
                            500 => "500 Internal Server Error".to_string(),
                            502 => "502 Bad Gateway".to_string(),
                            503 => "503 Service Unavailable".to_string(),
                            code => format!("{} Unknown", code),
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Per-endpoint request counter.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct Counter(Arc<AtomicU32>);

#[allow(dead_code)]
impl Counter {
    pub fn hit(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Configuration pointing at `addr` with millisecond-scale retry delays.
pub fn fast_config(addr: SocketAddr) -> ExplorerConfig {
    let mut config = ExplorerConfig::default();
    config.provider.base_url = format!("http://{}/api", addr);
    config.provider.request_timeout_secs = 5;
    config.retries.max_attempts = 3;
    config.retries.pre_request_delay_ms = 0;
    config.retries.retry_delay_ms = 10;
    config
}

/// Client for `config` that bypasses any system proxy.
pub fn client_for(config: &ExplorerConfig) -> ExplorerClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();
    ExplorerClient::with_http_client(config, http).unwrap()
}

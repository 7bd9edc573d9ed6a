//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use api_router::config::ServerConfig;
use api_router::routing::RouteRegistry;
use api_router::{HttpServer, Shutdown};

/// Start the router on `addr` and wait until it accepts connections.
pub async fn start_router(addr: SocketAddr, registry: RouteRegistry) -> Shutdown {
    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, registry);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    shutdown
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

//! Shared test utilities for cmindx-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use cmindx_core::{EventSink, MemoryEventSink};
use cmindx_server::{AppState, CmindxServer, ServerConfig};
use tokio::net::TcpListener;

/// Creates a test server over an in-memory sink, returns state and address
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    create_test_server_with_sink(Arc::new(MemoryEventSink::new())).await
}

/// Creates a test server over the given sink
#[allow(dead_code)]
pub async fn create_test_server_with_sink(sink: Arc<dyn EventSink>) -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::with_sink(sink));
    let server = CmindxServer::with_state(ServerConfig::default(), Arc::clone(&state));
    let addr = spawn_server(server).await;
    (state, addr)
}

/// Base URL for a spawned server
#[allow(dead_code)]
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: CmindxServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}

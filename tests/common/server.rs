//! Test servers
//!
//! - `TestApp` wraps the router in `axum_test::TestServer` (no socket)
//! - `spawn_http_server` serves the router on `127.0.0.1:0` for tests that
//!   need a real HTTP client and long-lived streams

use std::time::Duration;

use axum_test::TestServer;

use pulsechat::backend::routes::create_router;
use pulsechat::backend::server::{AppState, ServerConfig};

use super::database::create_test_pool;

pub const TEST_SECRET: &str = "pulsechat-test-secret";

/// Server configuration for tests: cheap bcrypt, fast keep-alive
pub fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: TEST_SECRET.to_string(),
        database_url: "sqlite::memory:".to_string(),
        bcrypt_cost: 4,
        keep_alive: Duration::from_secs(1),
        ..ServerConfig::default()
    }
}

/// In-process application with its state
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::new(test_config(), create_test_pool().await);
        let server = TestServer::new(create_router(state.clone())).expect("Failed to build test server");
        Self { server, state }
    }
}

/// Serve the app on an ephemeral local port
///
/// Returns the base URL and the state behind it.
pub async fn spawn_http_server() -> (String, AppState) {
    let state = AppState::new(test_config(), create_test_pool().await);
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    (format!("http://{}", addr), state)
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::TcpListener;

use doc_gateway::config::GatewayConfig;
use doc_gateway::engine::{EngineReply, ExecutionEngine};
use doc_gateway::errors::ApiError;
use doc_gateway::http::GatewayServer;
use doc_gateway::lifecycle::Shutdown;
use doc_gateway::model::{CanonicalRequest, CanonicalResponse};

/// Programmable funnel: `resolve` in the payload controls success or
/// rejection, `empty` requests a silent acknowledgment.
pub struct MockFunnel;

#[async_trait]
impl ExecutionEngine for MockFunnel {
    async fn execute(&self, request: CanonicalRequest) -> Result<EngineReply, ApiError> {
        let flag = |key: &str| {
            request
                .data
                .body
                .get(key)
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        if !flag("resolve") {
            return Err(ApiError::internal("rejected"));
        }
        if flag("empty") {
            return Ok(EngineReply::Empty);
        }
        Ok(EngineReply::Resolved(CanonicalResponse::success(&request)))
    }
}

/// Start a gateway on an ephemeral port. Returns its address and the
/// shutdown handle keeping it alive.
pub async fn spawn_gateway(engine: Arc<dyn ExecutionEngine>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();

    let server = GatewayServer::new(GatewayConfig::default(), engine);
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

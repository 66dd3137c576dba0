//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the API handlers
//! - Wire up middleware (tracing, body limits, request ID)
//! - Bind the server to a listener with graceful shutdown
//! - Write bridge outcomes to the transport, or hold the connection open
//!   without writing on suppression
//!
//! # Design Decisions
//! - No request timeout layer on the API route: a transport-level timeout
//!   would write bytes on the suppressed path; timeout policy belongs to
//!   the execution engine
//! - At most one write per connection: exactly one response, or zero bytes

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::engine::ExecutionEngine;
use crate::http::bridge::{self, BridgeOutcome};
use crate::model::RequestSource;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn ExecutionEngine>,
}

/// HTTP server for the document gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server around the given execution engine.
    pub fn new(config: GatewayConfig, engine: Arc<dyn ExecutionEngine>) -> Self {
        let state = AppState { engine };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/{controller}/{collection}/{action}", any(api_handler))
            .route("/api/{controller}/{action}", any(api_handler))
            .route("/api", any(api_root_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.api.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// API handler for routes carrying path metadata.
async fn api_handler(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    handle(state, params, query, headers, body).await
}

/// API handler for the bare `/api` route; metadata comes from the query
/// string and the body only.
async fn api_root_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    handle(state, HashMap::new(), query, headers, body).await
}

async fn handle(
    state: AppState,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let metadata = route_metadata(&params, &query);
    // Forwarded lossily rather than dropped: a header that is present but
    // not valid UTF-8 must fail the bridge's exact comparison, not pass as
    // if it were absent.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let outcome = bridge::execute_from_rest(
        state.engine.as_ref(),
        metadata,
        content_type.as_deref(),
        &body,
    )
    .await;

    match outcome {
        BridgeOutcome::Responded(wire) => {
            metrics::record_request(wire.status, start);
            let status = StatusCode::from_u16(wire.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(wire)).into_response()
        }
        BridgeOutcome::Suppressed => {
            metrics::record_suppressed();
            // Zero bytes are written on this path. The connection stays
            // open until the client's own timeout, which callers on the
            // fire-and-forget path treat as their success signal.
            std::future::pending::<Response>().await
        }
    }
}

/// Extract the primary field source from path and query parameters. Path
/// parameters win over query parameters of the same name.
fn route_metadata(
    params: &HashMap<String, String>,
    query: &HashMap<String, String>,
) -> RequestSource {
    let get = |key: &str| params.get(key).or_else(|| query.get(key)).cloned();

    RequestSource {
        controller: get("controller"),
        action: get("action"),
        collection: get("collection"),
        persist: get("persist").map(Value::String),
        request_id: get("requestId"),
        timestamp: None,
        id: get("id").or_else(|| get("_id")),
        body: None,
    }
}

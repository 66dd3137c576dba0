//! Document gateway library.
//!
//! The boundary layer of a document-oriented backend: normalizes inbound
//! HTTP requests into canonical requests, dispatches them to an execution
//! engine, and writes canonical, serializable responses back to the
//! transport.

pub mod config;
pub mod engine;
pub mod errors;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod plugin;

pub use config::GatewayConfig;
pub use engine::{EngineReply, ExecutionEngine};
pub use errors::{ApiError, ErrorSummary};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use model::{CanonicalRequest, CanonicalResponse};

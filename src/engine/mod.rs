//! Execution engine boundary.
//!
//! # Data Flow
//! ```text
//! CanonicalRequest
//!     → ExecutionEngine::execute (single suspension point)
//!     → EngineReply::Resolved(response)   → serialized and written
//!     → EngineReply::Empty                → transport write suppressed
//!     → Err(ApiError)                     → failure response written
//! ```
//!
//! # Design Decisions
//! - The engine is an external collaborator behind a trait; this crate
//!   never inspects how controllers and actions are executed
//! - `Empty` is an explicit acknowledgment mode, not a structural
//!   emptiness check on the result
//! - No timeout or cancellation here; that policy belongs to the engine

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::model::{CanonicalRequest, CanonicalResponse};

pub mod loopback;

pub use loopback::LoopbackEngine;

/// Reply from a completed engine dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineReply {
    /// A document response to serialize and write to the client.
    Resolved(CanonicalResponse),
    /// Acknowledgment with no response payload. The REST bridge writes
    /// nothing to the transport for this reply.
    Empty,
}

/// The funnel: executes a canonical request and settles with a reply or an
/// error. Errors carry their own status code; messages reach the client
/// verbatim.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn execute(&self, request: CanonicalRequest) -> Result<EngineReply, ApiError>;
}

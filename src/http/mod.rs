//! HTTP boundary subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → bridge.rs (validate transport, merge sources, dispatch to engine)
//!     → wire response written with Content-Type: application/json
//!       (or nothing at all, on the suppressed path)
//! ```

pub mod bridge;
pub mod server;

pub use bridge::{execute_from_rest, BridgeOutcome, MISSING_CONTROLLER, PROTOCOL_REST};
pub use server::GatewayServer;

//! Canonical request/response data model.
//!
//! # Data Flow
//! ```text
//! Raw sources (route metadata, body content)
//!     → request.rs (per-field precedence merge, id/timestamp defaults)
//!     → CanonicalRequest (immutable, dispatched to the engine)
//!
//! Engine result or failure
//!     → response.rs (scalar precedence merge, error-to-status mapping)
//!     → CanonicalResponse
//!     → wire.rs (three-member wire structure, blacklist, round-trip)
//! ```
//!
//! # Design Decisions
//! - Field presence is modeled with `Option`, never absence-of-key
//! - Construction is pure; validation belongs to the REST bridge
//! - The wire serializer is schema-driven: reconstruction depends only on
//!   serialized data

pub mod request;
pub mod response;
pub mod wire;

pub use request::{CanonicalRequest, RequestData, RequestSource};
pub use response::{CanonicalResponse, ResponseData, ResponseSource};
pub use wire::{serialize, unserialize, WireError, WireResponse};

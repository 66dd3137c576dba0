//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize structured logging (tracing)
//! - Collect and expose request metrics
//!
//! # Design Decisions
//! - The suppressed-response path gets its own counter: zero-byte outcomes
//!   are invisible in status-code metrics by definition

pub mod logging;
pub mod metrics;

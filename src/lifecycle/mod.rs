//! Lifecycle management subsystem.
//!
//! Startup is just configuration loading plus listener binding; the only
//! coordination this module owns is the graceful shutdown signal.

pub mod shutdown;

pub use shutdown::Shutdown;

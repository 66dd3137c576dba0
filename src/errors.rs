//! API error taxonomy.
//!
//! # Responsibilities
//! - Define the recognized error kinds and their fixed HTTP status codes
//! - Provide the error summary embedded in canonical responses
//!
//! # Design Decisions
//! - Tagged enum instead of class identity: status codes come from a match,
//!   not from runtime type inspection
//! - Engine failures are never reinterpreted; messages propagate verbatim
//! - No status code above 599 can be produced

/// Recognized error kinds. Each kind carries a fixed HTTP status code and a
/// client-visible message. Anything that does not fit a more specific kind
/// is an [`ApiError::Internal`] (500).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete client request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Request understood but not allowed (403).
    #[error("{0}")]
    Forbidden(String),

    /// Unknown document, collection or route (404).
    #[error("{0}")]
    NotFound(String),

    /// Generic internal failure (500).
    #[error("{0}")]
    Internal(String),

    /// Downstream dependency unavailable (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// HTTP status code baked into the error kind.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Message as sent to clients.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Internal(m)
            | ApiError::ServiceUnavailable(m) => m,
        }
    }
}

/// Error summary carried by a canonical response: the message shown to the
/// client plus the status code the error originated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSummary {
    pub message: String,
    pub status: u16,
}

impl From<&ApiError> for ErrorSummary {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.message().to_string(),
            status: error.status(),
        }
    }
}

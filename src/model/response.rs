//! Canonical response construction.
//!
//! # Responsibilities
//! - Derive a response from request metadata and an optional error
//! - Apply scalar precedence across two candidate sources
//! - Map recognized error kinds to their fixed status codes
//!
//! # Design Decisions
//! - `error` is `Some` if and only if `status != 200`, by construction
//! - `data` is copied only from the primary source, never merged from the
//!   fallback
//! - Immutable after construction except for `add_body`, the single
//!   supported mutation (wire-format round-trips need it)

use serde_json::{Map, Value};

use crate::errors::{ApiError, ErrorSummary};
use crate::model::request::{CanonicalRequest, RequestSource};

/// Raw, possibly partial source of response metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSource {
    pub protocol: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
    pub collection: Option<String>,
    pub request_id: Option<String>,
    pub timestamp: Option<i64>,
    pub data: Option<ResponseData>,
}

impl ResponseSource {
    /// Drop the data member, keeping the scalar metadata. Failure responses
    /// built by the bridge omit result data entirely.
    pub fn without_data(mut self) -> Self {
        self.data = None;
        self
    }
}

impl From<&CanonicalRequest> for ResponseSource {
    fn from(request: &CanonicalRequest) -> Self {
        Self {
            protocol: request.protocol.clone(),
            controller: request.controller.clone(),
            action: request.action.clone(),
            collection: request.collection.clone(),
            request_id: Some(request.request_id.clone()),
            timestamp: Some(request.timestamp),
            data: Some(ResponseData {
                id: request.data.id.clone(),
                body: Some(request.data.body.clone()),
                source: None,
            }),
        }
    }
}

impl From<&RequestSource> for ResponseSource {
    /// Scalar metadata only: a raw request source never contributes result
    /// data to a response.
    fn from(source: &RequestSource) -> Self {
        Self {
            protocol: None,
            controller: source.controller.clone(),
            action: source.action.clone(),
            collection: source.collection.clone(),
            request_id: source.request_id.clone(),
            timestamp: source.timestamp,
            data: None,
        }
    }
}

/// Document payload carried by a response.
///
/// `body` holds the request's body fields; `source` holds the `_source`
/// member recovered from the wire form. [`CanonicalResponse::add_body`]
/// replicates `source` into `body` after deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseData {
    pub id: Option<String>,
    pub body: Option<Map<String, Value>>,
    pub source: Option<Map<String, Value>>,
}

/// Outcome of one completed or failed dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalResponse {
    pub error: Option<ErrorSummary>,
    /// HTTP-style status code; 200 on success.
    pub status: u16,
    pub protocol: Option<String>,
    pub action: Option<String>,
    pub collection: Option<String>,
    pub controller: Option<String>,
    pub request_id: Option<String>,
    /// Copied from the originating request; `None` when none was supplied.
    pub timestamp: Option<i64>,
    /// `None` when the request carried no data.
    pub data: Option<ResponseData>,
}

impl CanonicalResponse {
    /// Build a response from two candidate sources and an optional error.
    ///
    /// Every scalar field is taken from the primary source if present, else
    /// from the fallback. `data` is copied only from the primary source.
    pub fn from_sources(
        primary: &ResponseSource,
        fallback: &ResponseSource,
        error: Option<&ApiError>,
    ) -> Self {
        let (status, summary) = match error {
            Some(error) => (error.status(), Some(ErrorSummary::from(error))),
            None => (200, None),
        };

        Self {
            error: summary,
            status,
            protocol: pick(&primary.protocol, &fallback.protocol),
            action: pick(&primary.action, &fallback.action),
            collection: pick(&primary.collection, &fallback.collection),
            controller: pick(&primary.controller, &fallback.controller),
            request_id: pick(&primary.request_id, &fallback.request_id),
            timestamp: primary.timestamp.or(fallback.timestamp),
            data: primary.data.clone(),
        }
    }

    /// Successful outcome echoing the originating request's metadata and
    /// payload.
    pub fn success(request: &CanonicalRequest) -> Self {
        Self::from_sources(&ResponseSource::from(request), &ResponseSource::default(), None)
    }

    /// Replicate `data.source` into `data.body` in place.
    ///
    /// Used after reconstructing a response from its wire form, where the
    /// body travels as `_source`. Idempotent: a present `body` is left
    /// untouched.
    pub fn add_body(&mut self) {
        if let Some(data) = &mut self.data {
            if data.body.is_none() {
                data.body = data.source.clone();
            }
        }
    }
}

fn pick<T: Clone>(first: &Option<T>, second: &Option<T>) -> Option<T> {
    first.clone().or_else(|| second.clone())
}

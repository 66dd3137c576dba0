//! REST execution bridge.
//!
//! # Responsibilities
//! - Validate transport preconditions (controller presence, content-type)
//! - Merge route/query metadata with body content into a canonical request
//! - Dispatch to the execution engine and settle with a terminal outcome
//!
//! # Design Decisions
//! - Validation failures are answered locally; the engine is never invoked
//!   for a request that fails transport checks
//! - Engine failures are propagated verbatim: their message and declared
//!   status code, no reinterpretation, no retry
//! - An empty engine reply suppresses the transport write entirely; the
//!   client's own timeout is the success signal on that path

use serde_json::Value;

use crate::engine::{EngineReply, ExecutionEngine};
use crate::errors::ApiError;
use crate::model::response::{CanonicalResponse, ResponseSource};
use crate::model::wire::{self, WireResponse};
use crate::model::{CanonicalRequest, RequestSource};

/// Protocol tag stamped on requests entering through this bridge.
pub const PROTOCOL_REST: &str = "rest";

/// Message returned when neither source supplies a controller.
pub const MISSING_CONTROLLER: &str = "The \"controller\" argument is missing";

/// Terminal outcome of one REST dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeOutcome {
    /// Exactly one transport write: this serialized response.
    Responded(WireResponse),
    /// Zero transport writes.
    Suppressed,
}

/// Run one HTTP request through the bridge state machine.
///
/// `metadata` is the primary field source (route and query parameters);
/// the decoded body is the fallback source and the payload carrier.
pub async fn execute_from_rest(
    engine: &dyn ExecutionEngine,
    metadata: RequestSource,
    content_type: Option<&str>,
    body: &[u8],
) -> BridgeOutcome {
    // Content-type is checked before the body is decoded, so malformed
    // payloads never reach the engine. The comparison is exact: parameters
    // such as a charset are rejected. A missing header is accepted.
    if let Some(value) = content_type {
        if value != "application/json" {
            return respond_error(
                &metadata,
                &RequestSource::default(),
                &ApiError::bad_request(format!(
                    "Invalid request content-type. Expected \"application/json\", got: \"{value}\""
                )),
            );
        }
    }

    let content = match decode_body(body) {
        Ok(content) => content,
        Err(e) => {
            return respond_error(
                &metadata,
                &RequestSource::default(),
                &ApiError::bad_request(format!("Unable to parse the request body: {e}")),
            );
        }
    };

    if metadata.controller.is_none() && content.controller.is_none() {
        return respond_error(&metadata, &content, &ApiError::bad_request(MISSING_CONTROLLER));
    }

    let request = CanonicalRequest::build(&metadata, &content, Some(PROTOCOL_REST));
    let request_meta = ResponseSource::from(&request).without_data();

    tracing::debug!(
        request_id = %request.request_id,
        controller = request.controller.as_deref().unwrap_or(""),
        action = request.action.as_deref().unwrap_or(""),
        collection = request.collection.as_deref().unwrap_or(""),
        "dispatching request to the execution engine"
    );

    match engine.execute(request).await {
        Ok(EngineReply::Resolved(response)) => {
            BridgeOutcome::Responded(wire::serialize(&response, &[]))
        }
        Ok(EngineReply::Empty) => {
            tracing::debug!("empty engine reply, transport write suppressed");
            BridgeOutcome::Suppressed
        }
        Err(error) => {
            tracing::warn!(error = %error, status = error.status(), "engine dispatch failed");
            let response = CanonicalResponse::from_sources(
                &request_meta,
                &ResponseSource::default(),
                Some(&error),
            );
            BridgeOutcome::Responded(wire::serialize(&response, &[]))
        }
    }
}

/// Build the local (pre-engine) failure response. Validation failures
/// carry scalar metadata only, never result data.
fn respond_error(
    metadata: &RequestSource,
    content: &RequestSource,
    error: &ApiError,
) -> BridgeOutcome {
    let response = CanonicalResponse::from_sources(
        &ResponseSource::from(metadata),
        &ResponseSource::from(content),
        Some(error),
    );
    BridgeOutcome::Responded(wire::serialize(&response, &[]))
}

fn decode_body(body: &[u8]) -> Result<RequestSource, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestSource::default());
    }

    let value: Value = serde_json::from_slice(body)?;
    Ok(match value.as_object() {
        Some(object) => RequestSource::from_json(object),
        None => RequestSource::default(),
    })
}

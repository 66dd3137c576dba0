//! Wire-format serialization.
//!
//! # Responsibilities
//! - Render a canonical response into the three-member wire structure
//!   `{status, error, result}`
//! - Apply the caller's field blacklist to the result section
//! - Reconstruct a canonical response from its wire form
//!
//! # Design Decisions
//! - `protocol` and `timestamp` never reach the wire
//! - `result` is null whenever the response carries no data, even when
//!   scalar metadata is known (error-only responses)
//! - Schema-driven: `unserialize` depends only on serialized data, never on
//!   reconstructing behavior
//! - Status-code ranges are not validated here; a wire form without a
//!   `status` member fails deserialization and is the caller's error

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ErrorSummary;
use crate::model::response::{CanonicalResponse, ResponseData};

/// Error member of the wire structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub message: String,
}

/// The transport-safe form of a response: exactly three top-level members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireResponse {
    pub status: u16,
    pub error: Option<WireError>,
    pub result: Option<Map<String, Value>>,
}

/// Render a response into its wire form, omitting any result field named in
/// `blacklist`.
pub fn serialize(response: &CanonicalResponse, blacklist: &[&str]) -> WireResponse {
    let result = response.data.as_ref().map(|data| {
        let mut result = Map::new();

        if let Some(action) = &response.action {
            result.insert("action".into(), Value::String(action.clone()));
        }
        if let Some(collection) = &response.collection {
            result.insert("collection".into(), Value::String(collection.clone()));
        }
        if let Some(controller) = &response.controller {
            result.insert("controller".into(), Value::String(controller.clone()));
        }
        if let Some(request_id) = &response.request_id {
            result.insert("requestId".into(), Value::String(request_id.clone()));
        }
        if let Some(id) = &data.id {
            result.insert("_id".into(), Value::String(id.clone()));
        }
        if let Some(source) = data.body.as_ref().or(data.source.as_ref()) {
            result.insert("_source".into(), Value::Object(source.clone()));
        }

        for field in blacklist {
            result.remove(*field);
        }
        result
    });

    WireResponse {
        status: response.status,
        error: response
            .error
            .as_ref()
            .map(|e| WireError { message: e.message.clone() }),
        result,
    }
}

/// Reconstruct a response from its wire form.
///
/// `protocol` and `timestamp` are intentionally absent from the wire and
/// come back as `None`; everything else round-trips, so re-serializing
/// yields the same visible structure.
pub fn unserialize(wire: &WireResponse) -> CanonicalResponse {
    let field = |key: &str| {
        wire.result
            .as_ref()
            .and_then(|r| r.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let data = wire.result.as_ref().map(|result| ResponseData {
        id: result.get("_id").and_then(Value::as_str).map(str::to_string),
        body: None,
        source: result.get("_source").and_then(Value::as_object).cloned(),
    });

    CanonicalResponse {
        error: wire.error.as_ref().map(|e| ErrorSummary {
            message: e.message.clone(),
            status: wire.status,
        }),
        status: wire.status,
        protocol: None,
        action: field("action"),
        collection: field("collection"),
        controller: field("controller"),
        request_id: field("requestId"),
        timestamp: None,
        data,
    }
}

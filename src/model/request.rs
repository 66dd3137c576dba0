//! Canonical request construction.
//!
//! # Responsibilities
//! - Merge two raw sources into one immutable request
//! - Apply per-field precedence: primary wins only where it actually
//!   defines the field
//! - Generate request id and timestamp defaults
//!
//! # Design Decisions
//! - No validation here; the bridge rejects requests before construction
//! - The payload body always comes from the source that carried the
//!   request content, never from route metadata
//! - Requests are owned by one request-handling call chain; no sharing

use serde_json::{Map, Value};
use uuid::Uuid;

/// Raw, possibly partial source of request fields.
///
/// Two of these are merged into a [`CanonicalRequest`]: route/query
/// metadata as the primary source and decoded body content as the fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSource {
    pub controller: Option<String>,
    pub action: Option<String>,
    pub collection: Option<String>,
    pub persist: Option<Value>,
    pub request_id: Option<String>,
    pub timestamp: Option<i64>,
    pub id: Option<String>,
    pub body: Option<Map<String, Value>>,
}

impl RequestSource {
    /// Extract a source from a decoded JSON object.
    ///
    /// Metadata keys are lifted out of the object. The payload is the
    /// object's `body` member when present, else the whole object.
    pub fn from_json(object: &Map<String, Value>) -> Self {
        let string_of =
            |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let body = match object.get("body").and_then(Value::as_object) {
            Some(body) => body.clone(),
            None => object.clone(),
        };

        Self {
            controller: string_of("controller"),
            action: string_of("action"),
            collection: string_of("collection"),
            persist: object.get("persist").cloned(),
            request_id: string_of("requestId"),
            timestamp: object.get("timestamp").and_then(Value::as_i64),
            id: string_of("id").or_else(|| string_of("_id")),
            body: Some(body),
        }
    }
}

/// Document payload carried by a request: an optional document id plus the
/// request body fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    pub id: Option<String>,
    pub body: Map<String, Value>,
}

/// Immutable, transport-agnostic representation of an inbound action
/// request.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
    /// Transport identifier, e.g. `"rest"`.
    pub protocol: Option<String>,
    /// Must be present before dispatch; checked by the bridge.
    pub controller: Option<String>,
    pub action: Option<String>,
    pub collection: Option<String>,
    /// Opaque persistence flag, forwarded untouched.
    pub persist: Option<Value>,
    /// Generated (UUID v4) when neither source supplies one.
    pub request_id: String,
    /// Milliseconds since the epoch; defaults to creation time.
    pub timestamp: i64,
    pub data: RequestData,
}

impl CanonicalRequest {
    /// Build a request by merging two raw sources.
    ///
    /// Scalar fields resolve primary-first. The document id and the payload
    /// body come from the fallback (the source carrying the request
    /// content) first, since an id or body in the content overrides
    /// anything inferred from route metadata.
    pub fn build(
        primary: &RequestSource,
        fallback: &RequestSource,
        protocol: Option<&str>,
    ) -> Self {
        Self {
            protocol: protocol.map(str::to_string),
            controller: pick(&primary.controller, &fallback.controller),
            action: pick(&primary.action, &fallback.action),
            collection: pick(&primary.collection, &fallback.collection),
            persist: pick(&primary.persist, &fallback.persist),
            request_id: pick(&primary.request_id, &fallback.request_id)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            timestamp: primary
                .timestamp
                .or(fallback.timestamp)
                .unwrap_or_else(now_millis),
            data: RequestData {
                id: pick(&fallback.id, &primary.id),
                body: fallback
                    .body
                    .clone()
                    .or_else(|| primary.body.clone())
                    .unwrap_or_default(),
            },
        }
    }
}

/// Per-field precedence: the first source wins only where it actually
/// defines the field.
fn pick<T: Clone>(first: &Option<T>, second: &Option<T>) -> Option<T> {
    first.clone().or_else(|| second.clone())
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn primary_wins_only_where_it_defines_the_field() {
        let primary = RequestSource {
            controller: Some("write".into()),
            ..Default::default()
        };
        let fallback = RequestSource {
            collection: Some("foobar".into()),
            action: Some("create".into()),
            ..Default::default()
        };

        let request = CanonicalRequest::build(&primary, &fallback, Some("rest"));

        assert_eq!(request.controller.as_deref(), Some("write"));
        assert_eq!(request.action.as_deref(), Some("create"));
        assert_eq!(request.collection.as_deref(), Some("foobar"));
        assert_eq!(request.protocol.as_deref(), Some("rest"));
    }

    #[test]
    fn request_id_and_timestamp_default_when_absent() {
        let request = CanonicalRequest::build(
            &RequestSource::default(),
            &RequestSource::default(),
            None,
        );

        assert!(!request.request_id.is_empty());
        assert!(request.timestamp > 0);
        assert!(request.data.body.is_empty());
    }

    #[test]
    fn supplied_request_id_is_kept() {
        let fallback = RequestSource {
            request_id: Some("fakerequestId".into()),
            ..Default::default()
        };
        let request =
            CanonicalRequest::build(&RequestSource::default(), &fallback, None);

        assert_eq!(request.request_id, "fakerequestId");
    }

    #[test]
    fn payload_comes_from_the_content_source() {
        let primary = RequestSource {
            body: Some(object(json!({"from": "metadata"}))),
            ..Default::default()
        };
        let fallback = RequestSource {
            body: Some(object(json!({"resolve": true}))),
            ..Default::default()
        };

        let request = CanonicalRequest::build(&primary, &fallback, None);
        assert_eq!(request.data.body, object(json!({"resolve": true})));
    }

    #[test]
    fn document_id_prefers_the_content_source() {
        let primary = RequestSource {
            id: Some("from-route".into()),
            ..Default::default()
        };
        let fallback = RequestSource {
            id: Some("fakeid".into()),
            ..Default::default()
        };

        let request = CanonicalRequest::build(&primary, &fallback, None);
        assert_eq!(request.data.id.as_deref(), Some("fakeid"));

        let route_only =
            CanonicalRequest::build(&primary, &RequestSource::default(), None);
        assert_eq!(route_only.data.id.as_deref(), Some("from-route"));
    }

    #[test]
    fn from_json_lifts_metadata_and_keeps_the_payload() {
        let source = RequestSource::from_json(&object(json!({
            "controller": "write",
            "action": "create",
            "body": {"foo": "bar"}
        })));

        assert_eq!(source.controller.as_deref(), Some("write"));
        assert_eq!(source.action.as_deref(), Some("create"));
        assert_eq!(source.body, Some(object(json!({"foo": "bar"}))));
    }

    #[test]
    fn from_json_without_body_member_uses_the_whole_object() {
        let source = RequestSource::from_json(&object(json!({"resolve": true})));
        assert_eq!(source.body, Some(object(json!({"resolve": true}))));
    }
}

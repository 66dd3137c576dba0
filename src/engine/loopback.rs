//! Loopback engine for standalone runs.

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{EngineReply, ExecutionEngine};
use crate::errors::ApiError;
use crate::model::{CanonicalRequest, CanonicalResponse};

/// Engine that echoes every request back as a successful response, except
/// persisted-only writes, which it acknowledges silently with
/// [`EngineReply::Empty`].
///
/// Stands in for the real funnel when the gateway runs without a backend,
/// and gives integration tests a deterministic collaborator.
#[derive(Debug, Default)]
pub struct LoopbackEngine;

#[async_trait]
impl ExecutionEngine for LoopbackEngine {
    async fn execute(&self, request: CanonicalRequest) -> Result<EngineReply, ApiError> {
        if is_truthy(request.persist.as_ref()) {
            tracing::debug!(
                request_id = %request.request_id,
                "loopback engine acknowledging persisted-only write"
            );
            return Ok(EngineReply::Empty);
        }

        tracing::debug!(
            request_id = %request.request_id,
            controller = ?request.controller,
            action = ?request.action,
            "loopback engine echoing request"
        );
        Ok(EngineReply::Resolved(CanonicalResponse::success(&request)))
    }
}

/// The persist flag is opaque to the gateway; over REST it arrives as a
/// string, from embedders as a bool.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestSource;

    fn request(persist: Option<Value>) -> CanonicalRequest {
        let fallback = RequestSource {
            controller: Some("write".into()),
            action: Some("create".into()),
            persist,
            ..Default::default()
        };
        CanonicalRequest::build(&RequestSource::default(), &fallback, Some("rest"))
    }

    #[tokio::test]
    async fn echoes_metadata_and_payload() {
        let request = request(None);

        let reply = LoopbackEngine.execute(request.clone()).await.unwrap();
        match reply {
            EngineReply::Resolved(response) => {
                assert_eq!(response.status, 200);
                assert_eq!(response.controller, request.controller);
                assert_eq!(response.action, request.action);
            }
            EngineReply::Empty => panic!("non-persisted requests are echoed"),
        }
    }

    #[tokio::test]
    async fn acknowledges_persisted_only_writes() {
        for persist in [Value::Bool(true), Value::String("true".into())] {
            let reply = LoopbackEngine
                .execute(request(Some(persist)))
                .await
                .unwrap();
            assert_eq!(reply, EngineReply::Empty);
        }
    }

    #[tokio::test]
    async fn falsy_persist_flags_are_echoed() {
        for persist in [Value::Bool(false), Value::String("false".into())] {
            let reply = LoopbackEngine
                .execute(request(Some(persist)))
                .await
                .unwrap();
            assert!(matches!(reply, EngineReply::Resolved(_)));
        }
    }
}

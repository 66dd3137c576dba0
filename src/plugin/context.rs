//! Capability injection for plugins.
//!
//! # Design Decisions
//! - An explicit struct of resolved references replaces lazy accessors
//!   closing over the host instance
//! - The surface is accessor-based and must stay stable across releases;
//!   plugins compiled against it keep working
//! - Connection bookkeeping on the router handle is the host's concern;
//!   the default handle only forwards execution to the engine

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{EngineReply, ExecutionEngine};
use crate::errors::ApiError;
use crate::model::CanonicalRequest;

/// Read access to one named repository.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<Value>, ApiError>;
}

/// Access to the host's repositories, resolved by name.
pub trait Repositories: Send + Sync {
    fn repository(&self, name: &str) -> Option<Arc<dyn Repository>>;
}

/// Router operations exposed to plugins.
#[async_trait]
pub trait RouterHandle: Send + Sync {
    async fn new_connection(&self, protocol: &str, connection_id: &str)
        -> Result<(), ApiError>;

    async fn execute(&self, request: CanonicalRequest) -> Result<EngineReply, ApiError>;

    async fn remove_connection(&self, connection_id: &str) -> Result<(), ApiError>;
}

/// Administrative actions runnable against the host out of band of the
/// request pipeline. Only available when the host runs with an admin
/// surface enabled.
#[async_trait]
pub trait RemoteActions: Send + Sync {
    async fn run(&self, action: &str, payload: &Value) -> Result<Value, ApiError>;
}

/// A compiled filter expression from the realtime matching DSL.
pub trait FilterExpression: Send + Sync {
    fn matches(&self, document: &Value) -> bool;
}

/// Constructor for filter expressions.
pub trait FilterFactory: Send + Sync {
    fn compile(&self, expression: &Value) -> Result<Box<dyn FilterExpression>, ApiError>;
}

/// Capabilities handed to a plugin at initialization.
#[derive(Clone)]
pub struct PluginContext {
    repositories: Arc<dyn Repositories>,
    router: Arc<dyn RouterHandle>,
    remote_actions: Option<Arc<dyn RemoteActions>>,
    filters: Arc<dyn FilterFactory>,
    http_port: u16,
}

impl PluginContext {
    pub fn new(
        repositories: Arc<dyn Repositories>,
        router: Arc<dyn RouterHandle>,
        remote_actions: Option<Arc<dyn RemoteActions>>,
        filters: Arc<dyn FilterFactory>,
        http_port: u16,
    ) -> Self {
        Self {
            repositories,
            router,
            remote_actions,
            filters,
            http_port,
        }
    }

    pub fn repositories(&self) -> &Arc<dyn Repositories> {
        &self.repositories
    }

    pub fn router(&self) -> &Arc<dyn RouterHandle> {
        &self.router
    }

    pub fn remote_actions(&self) -> Option<&Arc<dyn RemoteActions>> {
        self.remote_actions.as_ref()
    }

    pub fn filters(&self) -> &Arc<dyn FilterFactory> {
        &self.filters
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }
}

/// Default router handle: forwards execution straight to the engine and
/// treats connection bookkeeping as a logging-only concern.
pub struct EngineRouterHandle {
    engine: Arc<dyn ExecutionEngine>,
}

impl EngineRouterHandle {
    pub fn new(engine: Arc<dyn ExecutionEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl RouterHandle for EngineRouterHandle {
    async fn new_connection(
        &self,
        protocol: &str,
        connection_id: &str,
    ) -> Result<(), ApiError> {
        tracing::debug!(protocol, connection_id, "plugin connection registered");
        Ok(())
    }

    async fn execute(&self, request: CanonicalRequest) -> Result<EngineReply, ApiError> {
        self.engine.execute(request).await
    }

    async fn remove_connection(&self, connection_id: &str) -> Result<(), ApiError> {
        tracing::debug!(connection_id, "plugin connection removed");
        Ok(())
    }
}

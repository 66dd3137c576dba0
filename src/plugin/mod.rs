//! Plugin capability surface.
//!
//! Plugins never see the host directly. At initialization each plugin
//! receives a [`PluginContext`]: an explicit struct of resolved
//! capabilities. Error constructors are not part of the context; plugins
//! use the public [`crate::errors::ApiError`] variants.

pub mod context;

pub use context::{
    EngineRouterHandle, FilterExpression, FilterFactory, PluginContext, RemoteActions,
    Repositories, Repository, RouterHandle,
};

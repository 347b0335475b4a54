//! Tool Registry
//!
//! An identifier-keyed collection of [`ToolAdapter`]s, built once at startup
//! and immutable thereafter. Composition is strict: registering or merging a
//! duplicate identifier is a construction-time error, never a silent
//! override, so a misconfigured deployment fails before it serves a plan.
//!
//! The registry implements [`ToolInvokerPort`], the boundary the planning
//! engine dispatches through. At invocation time an unknown identifier maps
//! to a `NotFound` result; mid-plan the engine expects a result, not a
//! crash.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use waypoint_application::ports::tool_invoker::ToolInvokerPort;
use waypoint_domain::tool::{
    adapter::ToolAdapter,
    entities::{ToolDefinition, ToolRequest},
    value_objects::{ToolError, ToolResult},
};

/// Registry construction errors, fatal at startup
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate tool id: {0}")]
    DuplicateId(String),

    #[error("Unknown tool id: {0}")]
    NotFound(String),
}

/// Identifier-keyed collection of tool adapters
#[derive(Default)]
pub struct ToolRegistry {
    adapters: HashMap<String, Arc<dyn ToolAdapter>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its declared identifier
    pub fn register(&mut self, adapter: Arc<dyn ToolAdapter>) -> Result<(), RegistryError> {
        let id = adapter.id().to_string();
        if self.adapters.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        debug!(tool = %id, "Registered tool");
        self.adapters.insert(id, adapter);
        Ok(())
    }

    /// Builder-style register for composing at startup
    pub fn with(mut self, adapter: Arc<dyn ToolAdapter>) -> Result<Self, RegistryError> {
        self.register(adapter)?;
        Ok(self)
    }

    /// Merge another registry into this one. Any overlapping identifier is a
    /// `DuplicateId` error; nothing is overridden.
    pub fn merge(mut self, other: ToolRegistry) -> Result<Self, RegistryError> {
        for (_, adapter) in other.adapters {
            self.register(adapter)?;
        }
        Ok(self)
    }

    /// Look up an adapter by identifier
    pub fn resolve(&self, tool_id: &str) -> Result<&Arc<dyn ToolAdapter>, RegistryError> {
        self.adapters
            .get(tool_id)
            .ok_or_else(|| RegistryError::NotFound(tool_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[async_trait]
impl ToolInvokerPort for ToolRegistry {
    fn definitions(&self) -> Vec<&ToolDefinition> {
        let mut definitions: Vec<&ToolDefinition> =
            self.adapters.values().map(|a| a.definition()).collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }

    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        match self.resolve(&request.tool_id) {
            Ok(adapter) => adapter.invoke(request).await,
            Err(_) => ToolResult::failure(
                &request.tool_id,
                ToolError::not_found(format!("tool '{}'", request.tool_id)),
            ),
        }
    }
}

//! Tool Invoker port
//!
//! The boundary the planning engine consumes: one synchronous-per-step call
//! `invoke(request) -> ToolResult`. The engine owns step sequencing and
//! plan-level retries; this port's obligation ends at producing an honest,
//! typed result for a single tool invocation.

use async_trait::async_trait;
use waypoint_domain::tool::{
    entities::{ToolDefinition, ToolRequest},
    value_objects::ToolResult,
};

/// Port for invoking tools by stable identifier
#[async_trait]
pub trait ToolInvokerPort: Send + Sync {
    /// Declared schemas of all available tools
    fn definitions(&self) -> Vec<&ToolDefinition>;

    /// Check if a tool is available
    fn has_tool(&self, tool_id: &str) -> bool {
        self.definitions().iter().any(|d| d.id == tool_id)
    }

    /// Identifiers of all available tools
    fn tool_ids(&self) -> Vec<&str> {
        self.definitions().iter().map(|d| d.id.as_str()).collect()
    }

    /// Invoke a tool. An unknown identifier resolves to a `NotFound` failure
    /// result rather than a panic or transport error.
    async fn invoke(&self, request: &ToolRequest) -> ToolResult;
}

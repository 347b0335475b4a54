//! Tool adapter abstraction
//!
//! A [`ToolAdapter`] translates one validated [`ToolRequest`] into one
//! upstream HTTP interaction (or a fixed small sequence, e.g. authenticate
//! then query) and one normalized [`ToolResult`].
//!
//! Concrete adapters live in the infrastructure layer; the registry exposes
//! them to the planning engine by stable identifier:
//!
//! ```text
//! planning engine ──invoke(tool_id, args)──▶ ToolRegistry
//!                                                │ resolve(id)
//!                                                ▼
//!                                          ToolAdapter ──HTTP──▶ upstream API
//!                                                │
//!                                                ▼
//!                                           ToolResult
//! ```
//!
//! # Contract
//!
//! - Input validation happens before any network access; invalid input fails
//!   with a `Validation` error and issues zero calls.
//! - No fault propagates past `invoke`: every call path returns a
//!   [`ToolResult`].
//! - Adapters are safe for concurrent invocation; the planning engine may
//!   dispatch several tool calls in parallel within one plan execution.

use async_trait::async_trait;

use super::entities::{ToolDefinition, ToolRequest};
use super::value_objects::ToolResult;

/// Capability interface implemented once per external API
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// The tool's declared schema, consulted for validation and exposed to
    /// the planning engine
    fn definition(&self) -> &ToolDefinition;

    /// Stable identifier of the tool
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Invoke the tool with a validated-on-entry request
    async fn invoke(&self, request: &ToolRequest) -> ToolResult;
}

//! Planning Engine port
//!
//! The planning engine is an external collaborator: it sequences tool calls,
//! decides what a single tool failure means for the plan, and aggregates the
//! final answer. This system only hands it a plan request and receives one
//! aggregated outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a planning engine adapter
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine unreachable: {0}")]
    Unreachable(String),

    #[error("Engine returned HTTP {status}: {detail}")]
    UpstreamStatus { status: u16, detail: String },

    #[error("Engine produced malformed output: {0}")]
    MalformedOutput(String),

    #[error("Engine request timed out")]
    Timeout,
}

/// A plan request for the engine
///
/// `instructions` demands structured output (a fixed JSON schema) so no
/// post-hoc prose parsing is ever needed; `tool_ids` names the tools the
/// engine may dispatch through the tool invoker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub instructions: String,
    pub tool_ids: Vec<String>,
}

/// Aggregated outcome of one plan execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// The engine's final structured output
    pub document: serde_json::Value,
}

/// Port for the external planning engine
#[async_trait]
pub trait PlanningEnginePort: Send + Sync {
    /// Run one plan to completion and return the aggregated outcome
    async fn run(&self, request: &PlanRequest) -> Result<PlanOutcome, EngineError>;
}

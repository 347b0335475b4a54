//! Port definitions
//!
//! Interfaces the application layer depends on; implementations (adapters)
//! live in the infrastructure layer.

pub mod planning_engine;
pub mod tool_invoker;

pub use planning_engine::{EngineError, PlanOutcome, PlanRequest, PlanningEnginePort};
pub use tool_invoker::ToolInvokerPort;

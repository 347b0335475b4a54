//! Application layer for waypoint
//!
//! This crate contains use cases and port definitions. It depends only on the
//! domain layer; the infrastructure layer supplies the adapters behind each
//! port.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    planning_engine::{EngineError, PlanOutcome, PlanRequest, PlanningEnginePort},
    tool_invoker::ToolInvokerPort,
};
pub use use_cases::build_guide::{BuildGuideError, BuildGuideUseCase, GuideDocument};

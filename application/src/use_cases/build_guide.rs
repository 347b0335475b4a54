//! Build Guide use case.
//!
//! The orchestrator entry point: validates the trip query, builds a
//! structured-output plan request, and delegates execution to the external
//! planning engine. The engine consults the tool invoker per step; this use
//! case never sequences tool calls itself and never parses prose; the plan
//! demands a fixed JSON schema up front.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use waypoint_domain::tool::value_objects::ToolError;
use waypoint_domain::trip::TripQuery;

use crate::ports::planning_engine::{EngineError, PlanRequest, PlanningEnginePort};
use crate::ports::tool_invoker::ToolInvokerPort;

/// Errors that can occur while building a guide.
#[derive(Error, Debug)]
pub enum BuildGuideError {
    #[error("Invalid trip query: {0}")]
    InvalidQuery(ToolError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// The aggregated travel-guide document produced by one plan execution.
#[derive(Debug, Clone)]
pub struct GuideDocument {
    pub document: serde_json::Value,
}

impl GuideDocument {
    pub fn to_string_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.document)
            .unwrap_or_else(|_| self.document.to_string())
    }
}

/// Use case for building a travel guide for one trip.
pub struct BuildGuideUseCase {
    engine: Arc<dyn PlanningEnginePort>,
    tools: Arc<dyn ToolInvokerPort>,
}

impl BuildGuideUseCase {
    pub fn new(engine: Arc<dyn PlanningEnginePort>, tools: Arc<dyn ToolInvokerPort>) -> Self {
        Self { engine, tools }
    }

    /// Build a guide for the given trip.
    pub async fn execute(&self, trip: &TripQuery) -> Result<GuideDocument, BuildGuideError> {
        trip.validate().map_err(BuildGuideError::InvalidQuery)?;

        let tool_ids: Vec<String> = self.tools.tool_ids().iter().map(|s| s.to_string()).collect();
        let request = PlanRequest {
            instructions: plan_instructions(trip),
            tool_ids,
        };

        info!(
            source = %trip.source,
            destination = %trip.destination,
            date = %trip.journey_date,
            "Dispatching travel-guide plan"
        );
        let outcome = self.engine.run(&request).await?;
        debug!("Plan completed");

        Ok(GuideDocument {
            document: outcome.document,
        })
    }
}

/// Render the plan instructions for one trip.
///
/// The schema is fixed so the engine's output is structured end to end;
/// absent information must be reported as empty arrays or nulls, never
/// invented.
fn plan_instructions(trip: &TripQuery) -> String {
    format!(
        r#"Create a travel guide for {destination} as pure JSON with this exact structure:
{{
  "destination": {{"name": "{destination}", "overview": "string"}},
  "weather": {{"description": "string", "temperature": "string"}},
  "attractions": [{{"name": "string", "description": "string"}}],
  "flights": [{{"airline": "string", "flight_number": "string", "departure": "ISO8601 datetime", "arrival": "ISO8601 datetime", "price": "string"}}],
  "images": ["image_url"]
}}

Rules:
- Fill `overview` with 3-4 sentences about the destination.
- Each attraction must include both `name` and a short `description`.
- Use the flight_search tool for flights from {source} to {destination} on {date}.
- Use the weather_lookup tool for current conditions in {destination}.
- Use the image_search tool for images of attractions in {destination}.
- If a tool fails, emit an empty array for that section. Never invent data."#,
        destination = trip.destination,
        source = trip.source,
        date = trip.journey_date,
    )
}

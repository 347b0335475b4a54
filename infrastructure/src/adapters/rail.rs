//! `rail_search` tool: trains between two stations with seat availability.
//!
//! Talks to a RailRadar-style API authenticated with a static `x-api-key`
//! header. Each upstream train yields a [`TrainService`] with its fare-class
//! sub-records; a class whose numeric fields are unparseable normalizes those
//! fields to zero instead of failing the whole train. At most 5 trains are
//! returned, in upstream order.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use waypoint_domain::tool::{
    adapter::ToolAdapter,
    entities::{ParamKind, ToolDefinition, ToolParameter, ToolRequest},
    payload::{FareClass, ToolPayload, TrainService},
    validation::{SchemaValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use crate::http::{HttpRequest, HttpTransport};

use super::{string_or_unavailable, transport_failure, u32_or_zero, upstream_failure, MAX_ENTRIES};

/// Canonical tool id for the rail search tool.
pub const RAIL_SEARCH: &str = "rail_search";

fn definition() -> ToolDefinition {
    ToolDefinition::new(
        RAIL_SEARCH,
        "Search trains between stations with detailed seat availability",
    )
    .with_parameter(
        ToolParameter::new("origin", "Origin station code, e.g. NDLS", true)
            .with_kind(ParamKind::Station),
    )
    .with_parameter(
        ToolParameter::new("destination", "Destination station code, e.g. BCT", true)
            .with_kind(ParamKind::Station),
    )
    .with_parameter(
        ToolParameter::new("journey_date", "Journey date in YYYY-MM-DD format", true)
            .with_kind(ParamKind::Date),
    )
}

/// Rail search adapter
pub struct RailSearchAdapter {
    definition: ToolDefinition,
    transport: Arc<dyn HttpTransport>,
    search_url: String,
    api_key: String,
}

impl RailSearchAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        search_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            definition: definition(),
            transport,
            search_url: search_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn search(&self, request: &ToolRequest) -> Result<Vec<TrainService>, ToolError> {
        let origin = request.require_string("origin").map_err(ToolError::validation)?;
        let destination = request
            .require_string("destination")
            .map_err(ToolError::validation)?;
        let date = request
            .require_string("journey_date")
            .map_err(ToolError::validation)?;

        let http_request = HttpRequest::get(&self.search_url)
            .with_query("from", origin)
            .with_query("to", destination)
            .with_query("date", date)
            .with_query("availability", "true")
            .with_query("coaches", "true")
            .with_header("x-api-key", &self.api_key);

        let response = self
            .transport
            .execute(&http_request)
            .await
            .map_err(|e| transport_failure(RAIL_SEARCH, e))?;

        if response.is_auth_failure() {
            return Err(ToolError::auth(format!(
                "Rail API rejected the key (HTTP {})",
                response.status
            ))
            .with_status(response.status));
        }
        if !response.is_success() {
            return Err(upstream_failure(&response));
        }

        let body = response
            .json_value()
            .map_err(|e| ToolError::upstream(response.status, format!("malformed body: {}", e)))?;

        let trains = body["trains"].as_array().cloned().unwrap_or_default();
        debug!(tool = RAIL_SEARCH, upstream = trains.len(), "Normalizing trains");

        Ok(trains
            .iter()
            .map(normalize_train)
            .take(MAX_ENTRIES)
            .collect())
    }
}

fn normalize_train(train: &serde_json::Value) -> TrainService {
    let classes = train["classes"]
        .as_array()
        .map(|classes| classes.iter().map(normalize_class).collect())
        .unwrap_or_default();

    TrainService {
        number: string_or_unavailable(&train["number"]),
        name: string_or_unavailable(&train["name"]),
        departure_time: string_or_unavailable(&train["dep_time"]),
        arrival_time: string_or_unavailable(&train["arr_time"]),
        classes,
    }
}

fn normalize_class(class: &serde_json::Value) -> FareClass {
    FareClass {
        code: string_or_unavailable(&class["code"]),
        status: string_or_unavailable(&class["status"]),
        available_seats: u32_or_zero(&class["available"]),
        waiting_list: u32_or_zero(&class["wl"]),
        fare: string_or_unavailable(&class["fare"]),
        confirmation_probability: string_or_unavailable(&class["confirm_prob"]),
    }
}

#[async_trait]
impl ToolAdapter for RailSearchAdapter {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        let start = Instant::now();

        if let Err(e) = SchemaValidator.validate(request, &self.definition) {
            return ToolResult::failure(RAIL_SEARCH, e);
        }

        match self.search(request).await {
            Ok(trains) => ToolResult::success(RAIL_SEARCH, ToolPayload::Trains(trains)),
            Err(e) => ToolResult::failure(RAIL_SEARCH, e),
        }
        .with_duration(start.elapsed().as_millis() as u64)
    }
}

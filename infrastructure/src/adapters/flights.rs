//! `flight_search` tool: flight offers between two airports on a date.
//!
//! Talks to an Amadeus-style API: a client-credentials token exchange
//! followed by a bearer-authenticated offer search. The token lives in the
//! adapter's [`TokenManager`]; a 401-class search response forces one refresh
//! and one retry before surfacing an auth failure.
//!
//! # Normalization
//!
//! Each upstream offer yields one [`FlightOffer`]: carrier and flight number
//! from the first segment of the first itinerary, departure from that
//! segment, arrival from the last segment, and the offer's total price.
//! Offers missing carrier or flight number are dropped; any other absent
//! sub-field carries the `unavailable` marker. At most 5 offers are returned,
//! in upstream order.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use waypoint_domain::auth::ClientCredentials;
use waypoint_domain::tool::{
    adapter::ToolAdapter,
    entities::{ParamKind, ToolDefinition, ToolParameter, ToolRequest},
    payload::{FlightOffer, FlightPoint, ToolPayload, UNAVAILABLE},
    validation::{SchemaValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use crate::http::{HttpRequest, HttpTransport};
use crate::token_manager::TokenManager;

use super::{send_with_bearer, upstream_failure, MAX_ENTRIES};

/// Canonical tool id for the flight search tool.
pub const FLIGHT_SEARCH: &str = "flight_search";

fn definition() -> ToolDefinition {
    ToolDefinition::new(
        FLIGHT_SEARCH,
        "Search available flights between two airports for a given date",
    )
    .with_parameter(
        ToolParameter::new("origin", "IATA code of the origin airport (e.g., DEL)", true)
            .with_kind(ParamKind::Iata),
    )
    .with_parameter(
        ToolParameter::new(
            "destination",
            "IATA code of the destination airport (e.g., BLR)",
            true,
        )
        .with_kind(ParamKind::Iata),
    )
    .with_parameter(
        ToolParameter::new("date", "Date of travel in YYYY-MM-DD format", true)
            .with_kind(ParamKind::Date),
    )
    .with_parameter(
        ToolParameter::new("adults", "Number of adult passengers (default 1)", false)
            .with_kind(ParamKind::Integer),
    )
}

/// Flight search adapter
pub struct FlightSearchAdapter {
    definition: ToolDefinition,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenManager<dyn HttpTransport>,
    search_url: String,
}

impl FlightSearchAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        search_url: impl Into<String>,
        token_url: impl Into<String>,
        credentials: ClientCredentials,
    ) -> Self {
        let tokens = TokenManager::new(transport.clone(), token_url, credentials);
        Self {
            definition: definition(),
            transport,
            tokens,
            search_url: search_url.into(),
        }
    }

    async fn search(&self, request: &ToolRequest) -> Result<Vec<FlightOffer>, ToolError> {
        // Required args are guaranteed present by validation
        let origin = request.require_string("origin").map_err(ToolError::validation)?;
        let destination = request
            .require_string("destination")
            .map_err(ToolError::validation)?;
        let date = request.require_string("date").map_err(ToolError::validation)?;
        let adults = request.get_i64("adults").unwrap_or(1);

        let response = send_with_bearer(&self.transport, &self.tokens, FLIGHT_SEARCH, |token| {
            HttpRequest::get(&self.search_url)
                .with_query("originLocationCode", origin)
                .with_query("destinationLocationCode", destination)
                .with_query("departureDate", date)
                .with_query("adults", adults.to_string())
                .with_header("Authorization", format!("Bearer {}", token))
        })
        .await?;

        if !response.is_success() {
            return Err(upstream_failure(&response));
        }

        let body = response
            .json_value()
            .map_err(|e| ToolError::upstream(response.status, format!("malformed body: {}", e)))?;

        let offers = body["data"].as_array().cloned().unwrap_or_default();
        debug!(tool = FLIGHT_SEARCH, upstream = offers.len(), "Normalizing offers");

        Ok(offers
            .iter()
            .filter_map(normalize_offer)
            .take(MAX_ENTRIES)
            .collect())
    }
}

/// Normalize one upstream offer; `None` drops it entirely.
fn normalize_offer(offer: &serde_json::Value) -> Option<FlightOffer> {
    let segments = offer["itineraries"][0]["segments"].as_array()?;
    let first = segments.first()?;
    let last = segments.last()?;

    // Carrier and flight number identify the entry; without them it is
    // dropped rather than padded with markers.
    let carrier = first["carrierCode"].as_str().filter(|s| !s.is_empty())?;
    let flight_number = first["number"].as_str().filter(|s| !s.is_empty())?;

    Some(FlightOffer {
        carrier: carrier.to_string(),
        flight_number: flight_number.to_string(),
        departure: normalize_point(&first["departure"]),
        arrival: normalize_point(&last["arrival"]),
        price: super::string_or_unavailable(&offer["price"]["total"]),
        currency: super::string_or_unavailable(&offer["price"]["currency"]),
    })
}

fn normalize_point(point: &serde_json::Value) -> FlightPoint {
    FlightPoint {
        at: point["at"].as_str().unwrap_or(UNAVAILABLE).to_string(),
        airport: point["iataCode"].as_str().unwrap_or(UNAVAILABLE).to_string(),
    }
}

#[async_trait]
impl ToolAdapter for FlightSearchAdapter {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        let start = Instant::now();

        if let Err(e) = SchemaValidator.validate(request, &self.definition) {
            return ToolResult::failure(FLIGHT_SEARCH, e);
        }

        match self.search(request).await {
            Ok(offers) => ToolResult::success(FLIGHT_SEARCH, ToolPayload::Flights(offers)),
            Err(e) => ToolResult::failure(FLIGHT_SEARCH, e),
        }
        .with_duration(start.elapsed().as_millis() as u64)
    }
}

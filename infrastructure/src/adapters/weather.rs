//! `weather_lookup` tool: hourly temperature for a free-text location.
//!
//! Two fixed steps against an Open-Meteo-style API, neither authenticated:
//! geocode the city name to coordinates, then fetch the hourly temperature
//! series. A geocoding miss is a `NotFound` failure and the forecast endpoint
//! is never called, distinct from an empty forecast, which is a success.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use waypoint_domain::tool::{
    adapter::ToolAdapter,
    entities::{ToolDefinition, ToolParameter, ToolRequest},
    payload::{GeoLocation, HourlyReading, ToolPayload, WeatherReport},
    validation::{SchemaValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use crate::http::{HttpRequest, HttpTransport};

use super::{transport_failure, upstream_failure};

/// Canonical tool id for the weather tool.
pub const WEATHER_LOOKUP: &str = "weather_lookup";

/// Hourly readings are capped at one day.
const MAX_READINGS: usize = 24;

fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WEATHER_LOOKUP,
        "Look up hourly temperature readings for a city",
    )
    .with_parameter(ToolParameter::new(
        "city",
        "Free-text name of the city (e.g., Bengaluru)",
        true,
    ))
}

/// Weather lookup adapter
pub struct WeatherAdapter {
    definition: ToolDefinition,
    transport: Arc<dyn HttpTransport>,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            definition: definition(),
            transport,
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    async fn geocode(&self, city: &str) -> Result<GeoLocation, ToolError> {
        let request = HttpRequest::get(&self.geocoding_url)
            .with_query("name", city)
            .with_query("count", "1");

        let response = self
            .transport
            .execute(&request)
            .await
            .map_err(|e| transport_failure(WEATHER_LOOKUP, e))?;

        if !response.is_success() {
            return Err(upstream_failure(&response));
        }

        let body = response
            .json_value()
            .map_err(|e| ToolError::upstream(response.status, format!("malformed body: {}", e)))?;

        let results = body["results"].as_array().cloned().unwrap_or_default();
        let Some(hit) = results.first() else {
            return Err(ToolError::not_found(format!("city '{}'", city)));
        };

        let (Some(latitude), Some(longitude)) =
            (hit["latitude"].as_f64(), hit["longitude"].as_f64())
        else {
            return Err(ToolError::upstream(
                response.status,
                "geocoding hit without coordinates",
            ));
        };

        Ok(GeoLocation {
            name: hit["name"].as_str().unwrap_or(city).to_string(),
            latitude,
            longitude,
        })
    }

    async fn forecast(&self, location: GeoLocation) -> Result<WeatherReport, ToolError> {
        let request = HttpRequest::get(&self.forecast_url)
            .with_query("latitude", location.latitude.to_string())
            .with_query("longitude", location.longitude.to_string())
            .with_query("hourly", "temperature_2m");

        let response = self
            .transport
            .execute(&request)
            .await
            .map_err(|e| transport_failure(WEATHER_LOOKUP, e))?;

        if !response.is_success() {
            return Err(upstream_failure(&response));
        }

        let body = response
            .json_value()
            .map_err(|e| ToolError::upstream(response.status, format!("malformed body: {}", e)))?;

        let times = body["hourly"]["time"].as_array().cloned().unwrap_or_default();
        let values = body["hourly"]["temperature_2m"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        // Parallel arrays: zip pairs off whichever is shorter
        let readings: Vec<HourlyReading> = times
            .iter()
            .zip(values.iter())
            .filter_map(|(time, value)| {
                Some(HourlyReading {
                    time: time.as_str()?.to_string(),
                    value: value.as_f64()?,
                })
            })
            .take(MAX_READINGS)
            .collect();

        debug!(tool = WEATHER_LOOKUP, readings = readings.len(), "Normalized forecast");

        Ok(WeatherReport {
            location,
            unit: body["hourly_units"]["temperature_2m"]
                .as_str()
                .unwrap_or("°C")
                .to_string(),
            readings,
        })
    }
}

#[async_trait]
impl ToolAdapter for WeatherAdapter {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        let start = Instant::now();

        if let Err(e) = SchemaValidator.validate(request, &self.definition) {
            return ToolResult::failure(WEATHER_LOOKUP, e);
        }

        let city = match request.require_string("city") {
            Ok(c) => c,
            Err(e) => return ToolResult::failure(WEATHER_LOOKUP, ToolError::validation(e)),
        };

        let outcome = match self.geocode(city).await {
            Ok(location) => self.forecast(location).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(report) => ToolResult::success(WEATHER_LOOKUP, ToolPayload::Weather(report)),
            Err(e) => ToolResult::failure(WEATHER_LOOKUP, e),
        }
        .with_duration(start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubTransport;
    use waypoint_domain::tool::value_objects::ToolErrorKind;

    const GEO_URL: &str = "https://geo.example/v1/search";
    const FORECAST_URL: &str = "https://weather.example/v1/forecast";

    fn adapter(stub: std::sync::Arc<StubTransport>) -> WeatherAdapter {
        WeatherAdapter::new(stub, GEO_URL, FORECAST_URL)
    }

    fn geo_hit() -> &'static str {
        r#"{"results":[{"name":"Bengaluru","latitude":12.97,"longitude":77.59}]}"#
    }

    fn hourly_body(hours: usize) -> String {
        let times: Vec<String> = (0..hours)
            .map(|h| format!("2025-09-18T{:02}:00", h % 24))
            .collect();
        let values: Vec<f64> = (0..hours).map(|h| 20.0 + h as f64 * 0.1).collect();
        serde_json::json!({
            "hourly_units": {"temperature_2m": "°C"},
            "hourly": {"time": times, "temperature_2m": values}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_geocode_then_forecast() {
        let stub = std::sync::Arc::new(
            StubTransport::new()
                .respond_json(GEO_URL, 200, geo_hit())
                .respond_json(FORECAST_URL, 200, &hourly_body(6)),
        );
        let request = ToolRequest::new(WEATHER_LOOKUP).with_arg("city", "Bengaluru");
        let result = adapter(stub.clone()).invoke(&request).await;

        assert!(result.is_success());
        let Some(ToolPayload::Weather(report)) = result.payload() else {
            panic!("wrong payload variant");
        };
        assert_eq!(report.location.name, "Bengaluru");
        assert_eq!(report.unit, "°C");
        assert_eq!(report.readings.len(), 6);
        assert_eq!(report.readings[0].time, "2025-09-18T00:00");

        // Forecast was called with the resolved coordinates
        let forecasts = stub.requests_to(FORECAST_URL);
        assert_eq!(forecasts[0].query_param("latitude"), Some("12.97"));
    }

    #[tokio::test]
    async fn test_geocoding_miss_is_not_found_with_zero_forecast_calls() {
        let stub = std::sync::Arc::new(StubTransport::new().respond_json(
            GEO_URL,
            200,
            r#"{"results":[]}"#,
        ));
        let request = ToolRequest::new(WEATHER_LOOKUP).with_arg("city", "Atlantis");
        let result = adapter(stub.clone()).invoke(&request).await;

        let error = result.error().unwrap();
        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert!(error.message.contains("Atlantis"));
        assert_eq!(stub.calls_to(FORECAST_URL), 0);
    }

    #[tokio::test]
    async fn test_readings_capped_at_one_day() {
        let stub = std::sync::Arc::new(
            StubTransport::new()
                .respond_json(GEO_URL, 200, geo_hit())
                .respond_json(FORECAST_URL, 200, &hourly_body(168)),
        );
        let request = ToolRequest::new(WEATHER_LOOKUP).with_arg("city", "Bengaluru");
        let result = adapter(stub).invoke(&request).await;

        let Some(ToolPayload::Weather(report)) = result.payload() else {
            panic!("wrong payload variant");
        };
        assert_eq!(report.readings.len(), 24);
    }

    #[tokio::test]
    async fn test_empty_forecast_is_success() {
        let stub = std::sync::Arc::new(
            StubTransport::new()
                .respond_json(GEO_URL, 200, geo_hit())
                .respond_json(FORECAST_URL, 200, r#"{"hourly":{"time":[],"temperature_2m":[]}}"#),
        );
        let request = ToolRequest::new(WEATHER_LOOKUP).with_arg("city", "Bengaluru");
        let result = adapter(stub).invoke(&request).await;

        assert!(result.is_success());
        assert_eq!(result.metadata.entry_count, Some(0));
    }

    #[tokio::test]
    async fn test_missing_city_issues_zero_calls() {
        let stub = std::sync::Arc::new(StubTransport::new());
        let adapter = adapter(stub.clone());

        let result = adapter.invoke(&ToolRequest::new(WEATHER_LOOKUP)).await;

        assert_eq!(result.error().unwrap().kind, ToolErrorKind::Validation);
        assert_eq!(stub.call_count(), 0);
    }
}

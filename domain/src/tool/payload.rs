//! Typed tool payloads
//!
//! The set of supported capabilities is closed: each adapter produces exactly
//! one [`ToolPayload`] variant, so consumers can match exhaustively instead of
//! scraping semi-structured text.
//!
//! Normalization never fabricates data. When an upstream record is included
//! but one of its non-identifying sub-fields is absent, the field carries the
//! explicit [`UNAVAILABLE`] marker instead of a plausible-looking value.

use serde::{Deserialize, Serialize};

/// Marker for a sub-field the upstream response did not provide.
pub const UNAVAILABLE: &str = "unavailable";

/// Normalized output of a tool invocation, one variant per capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ToolPayload {
    /// Flight offers, in upstream relevance order
    Flights(Vec<FlightOffer>),
    /// Image descriptors, in upstream relevance order
    Images(Vec<ImageAsset>),
    /// Time-bucketed weather readings for a resolved location
    Weather(WeatherReport),
    /// Train services with per-class availability, in upstream order
    Trains(Vec<TrainService>),
}

impl ToolPayload {
    /// Number of normalized entries carried by the payload
    pub fn entry_count(&self) -> usize {
        match self {
            ToolPayload::Flights(offers) => offers.len(),
            ToolPayload::Images(images) => images.len(),
            ToolPayload::Weather(report) => report.readings.len(),
            ToolPayload::Trains(trains) => trains.len(),
        }
    }
}

/// One endpoint of a flight segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPoint {
    /// Scheduled timestamp as reported upstream (ISO 8601)
    pub at: String,
    /// IATA airport code
    pub airport: String,
}

/// A normalized flight offer
///
/// `carrier` and `flight_number` are the identifying fields: an upstream
/// offer missing either is dropped entirely. Every other field falls back to
/// [`UNAVAILABLE`] when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOffer {
    /// Operating carrier code (e.g. "AI")
    pub carrier: String,
    /// Flight number within the carrier (e.g. "504")
    pub flight_number: String,
    /// Departure of the first segment
    pub departure: FlightPoint,
    /// Arrival of the last segment
    pub arrival: FlightPoint,
    /// Total price as reported upstream
    pub price: String,
    /// Currency of the price
    pub currency: String,
}

/// A normalized image descriptor
///
/// Entries without a resolvable media URL are dropped during normalization,
/// so `url` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Direct media URL
    pub url: String,
    /// Photographer attribution, when the upstream provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
}

/// A geographic location resolved from free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Resolved place name
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One time-bucketed reading of the requested measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Start of the hour bucket (ISO 8601)
    pub time: String,
    /// Measured value
    pub value: f64,
}

/// Hourly weather readings for a resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Location the free-text query resolved to
    pub location: GeoLocation,
    /// Unit of the measurement (e.g. "°C")
    pub unit: String,
    /// Readings in chronological order
    pub readings: Vec<HourlyReading>,
}

/// Availability of one fare class on a train
///
/// Numeric fields that the upstream reports in an unparseable form normalize
/// to zero rather than failing the whole train entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareClass {
    /// Class code (e.g. "3A", "SL")
    pub code: String,
    /// Booking status string as reported upstream
    pub status: String,
    pub available_seats: u32,
    pub waiting_list: u32,
    /// Fare as reported upstream
    pub fare: String,
    /// Confirmation likelihood as reported upstream
    pub confirmation_probability: String,
}

/// A normalized train service between two stations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainService {
    /// Train number (e.g. "12951")
    pub number: String,
    /// Train name
    pub name: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// Per-class availability sub-records
    pub classes: Vec<FareClass>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_count_per_variant() {
        let flights = ToolPayload::Flights(vec![]);
        assert_eq!(flights.entry_count(), 0);

        let weather = ToolPayload::Weather(WeatherReport {
            location: GeoLocation {
                name: "Pune".to_string(),
                latitude: 18.52,
                longitude: 73.86,
            },
            unit: "°C".to_string(),
            readings: vec![
                HourlyReading {
                    time: "2025-09-18T00:00".to_string(),
                    value: 24.1,
                },
                HourlyReading {
                    time: "2025-09-18T01:00".to_string(),
                    value: 23.8,
                },
            ],
        });
        assert_eq!(weather.entry_count(), 2);
    }

    #[test]
    fn test_payload_serialization_is_tagged() {
        let payload = ToolPayload::Images(vec![ImageAsset {
            url: "https://images.example/pune.jpg".to_string(),
            photographer: Some("A. Sharma".to_string()),
        }]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "images");
        assert_eq!(json["data"][0]["url"], "https://images.example/pune.jpg");
    }
}

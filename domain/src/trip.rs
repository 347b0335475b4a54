//! Trip query accepted by the orchestrator entry point

use serde::{Deserialize, Serialize};

use crate::tool::validation::{is_iata_code, is_iso_date};
use crate::tool::value_objects::ToolError;

/// The trip a caller wants a travel guide for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripQuery {
    /// IATA code of the origin airport
    pub source: String,
    /// IATA code of the destination airport
    pub destination: String,
    /// Journey date in `YYYY-MM-DD` form
    pub journey_date: String,
}

impl TripQuery {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        journey_date: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            journey_date: journey_date.into(),
        }
    }

    /// Validate field formats before the planning engine is engaged
    pub fn validate(&self) -> Result<(), ToolError> {
        if !is_iata_code(&self.source) {
            return Err(ToolError::validation(format!(
                "source must be a three-letter IATA code, got '{}'",
                self.source
            )));
        }
        if !is_iata_code(&self.destination) {
            return Err(ToolError::validation(format!(
                "destination must be a three-letter IATA code, got '{}'",
                self.destination
            )));
        }
        if !is_iso_date(&self.journey_date) {
            return Err(ToolError::validation(format!(
                "journey_date must be a YYYY-MM-DD date, got '{}'",
                self.journey_date
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_trip() {
        assert!(TripQuery::new("DEL", "BLR", "2025-09-18").validate().is_ok());
    }

    #[test]
    fn test_invalid_trip_fields() {
        assert!(TripQuery::new("Delhi", "BLR", "2025-09-18").validate().is_err());
        assert!(TripQuery::new("DEL", "blr", "2025-09-18").validate().is_err());
        assert!(TripQuery::new("DEL", "BLR", "18 Sep 2025").validate().is_err());
    }
}

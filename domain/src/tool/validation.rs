//! Tool request validation
//!
//! Pure domain logic that checks a [`ToolRequest`] against a
//! [`ToolDefinition`] without any I/O. Adapters run this before touching the
//! network, so an invalid request fails with zero side effects.

use chrono::NaiveDate;

use super::entities::{ParamKind, ToolDefinition, ToolRequest};
use super::value_objects::ToolError;

/// Validator for tool requests
pub trait ToolValidator {
    /// Validate a request against a tool definition
    fn validate(&self, request: &ToolRequest, definition: &ToolDefinition)
        -> Result<(), ToolError>;
}

/// Default implementation of [`ToolValidator`]
///
/// Checks, in order: required parameters present, no unknown parameters,
/// JSON types match the declared kind, and value formats hold (IATA code,
/// ISO date, station code).
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator;

impl ToolValidator for SchemaValidator {
    fn validate(
        &self,
        request: &ToolRequest,
        definition: &ToolDefinition,
    ) -> Result<(), ToolError> {
        for param in &definition.parameters {
            match request.arguments.get(&param.name) {
                None if param.required => {
                    return Err(ToolError::validation(format!(
                        "Missing required argument '{}' for tool '{}'",
                        param.name, definition.id
                    )));
                }
                None => continue,
                Some(value) => check_value(&definition.id, &param.name, param.kind, value)?,
            }
        }

        for arg_name in request.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(ToolError::validation(format!(
                    "Unknown argument '{}' for tool '{}'",
                    arg_name, definition.id
                )));
            }
        }

        Ok(())
    }
}

fn check_value(
    tool_id: &str,
    name: &str,
    kind: ParamKind,
    value: &serde_json::Value,
) -> Result<(), ToolError> {
    let type_error = || {
        ToolError::validation(format!(
            "Argument '{}' for tool '{}' must be a {}",
            name, tool_id, kind
        ))
    };

    match kind {
        ParamKind::String => {
            value.as_str().ok_or_else(type_error)?;
        }
        ParamKind::Integer => {
            value.as_i64().ok_or_else(type_error)?;
        }
        ParamKind::Iata => {
            let s = value.as_str().ok_or_else(type_error)?;
            if !is_iata_code(s) {
                return Err(ToolError::validation(format!(
                    "Argument '{}' for tool '{}' must be a three-letter IATA code, got '{}'",
                    name, tool_id, s
                )));
            }
        }
        ParamKind::Date => {
            let s = value.as_str().ok_or_else(type_error)?;
            if !is_iso_date(s) {
                return Err(ToolError::validation(format!(
                    "Argument '{}' for tool '{}' must be a YYYY-MM-DD date, got '{}'",
                    name, tool_id, s
                )));
            }
        }
        ParamKind::Station => {
            let s = value.as_str().ok_or_else(type_error)?;
            if !is_station_code(s) {
                return Err(ToolError::validation(format!(
                    "Argument '{}' for tool '{}' must be a station code, got '{}'",
                    name, tool_id, s
                )));
            }
        }
    }

    Ok(())
}

/// Three uppercase ASCII letters
pub fn is_iata_code(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// A real calendar date in `YYYY-MM-DD` form
pub fn is_iso_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Two to five uppercase ASCII letters
pub fn is_station_code(s: &str) -> bool {
    (2..=5).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase())
}

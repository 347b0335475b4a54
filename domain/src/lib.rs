//! Domain layer for waypoint
//!
//! This crate contains the core contracts of the tool-orchestration system:
//! tool schemas and requests, the result/error taxonomy, typed capability
//! payloads, and credential value objects. It has no dependencies on
//! infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tool Adapter
//!
//! A tool adapter translates one validated [`ToolRequest`] into one upstream
//! HTTP interaction and one normalized [`ToolResult`]. The adapter trait lives
//! here; concrete adapters (flights, images, weather, rail) live in the
//! infrastructure layer.
//!
//! ## Fail-fast validation
//!
//! Every request is validated against its tool's declared schema before any
//! network call is made. Invalid input produces a `Validation` failure with
//! zero side effects.

pub mod auth;
pub mod tool;
pub mod trip;

// Re-export commonly used types
pub use auth::{AccessToken, ClientCredentials};
pub use tool::{
    adapter::ToolAdapter,
    entities::{ParamKind, ToolDefinition, ToolParameter, ToolRequest},
    payload::{
        FareClass, FlightOffer, FlightPoint, GeoLocation, HourlyReading, ImageAsset, ToolPayload,
        TrainService, WeatherReport, UNAVAILABLE,
    },
    validation::{SchemaValidator, ToolValidator},
    value_objects::{ToolError, ToolErrorKind, ToolResult, ToolResultMetadata},
};
pub use trip::TripQuery;

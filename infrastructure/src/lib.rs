//! Infrastructure layer for waypoint
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP tool adapters for the travel APIs,
//! the token manager, the tool registry, the remote planning engine,
//! and configuration file loading.

pub mod adapters;
pub mod config;
pub mod engine;
pub mod http;
pub mod registry;
pub mod token_manager;

// Re-export commonly used types
pub use adapters::{FlightSearchAdapter, ImageSearchAdapter, RailSearchAdapter, WeatherAdapter};
pub use config::{ConfigLoader, FileConfig};
pub use engine::RemotePlanningEngine;
pub use http::{HttpTransport, ReqwestTransport};
pub use registry::{RegistryError, ToolRegistry};
pub use token_manager::TokenManager;

use std::sync::Arc;
use waypoint_domain::ClientCredentials;

/// Build the registry of built-in tool adapters from a loaded config.
///
/// Every adapter shares the one transport so connection pooling and
/// timeouts are configured in a single place.
pub fn builtin_registry(
    transport: Arc<dyn HttpTransport>,
    config: &FileConfig,
) -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::new()
        .with(Arc::new(FlightSearchAdapter::new(
            transport.clone(),
            &config.flights.search_url,
            &config.flights.token_url,
            ClientCredentials::new(&config.flights.api_key, &config.flights.api_secret),
        )))?
        .with(Arc::new(ImageSearchAdapter::new(
            transport.clone(),
            &config.images.search_url,
            &config.images.api_key,
        )))?
        .with(Arc::new(WeatherAdapter::new(
            transport.clone(),
            &config.weather.geocoding_url,
            &config.weather.forecast_url,
        )))?
        .with(Arc::new(RailSearchAdapter::new(
            transport,
            &config.rail.search_url,
            &config.rail.api_key,
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubTransport;
    use waypoint_application::ports::ToolInvokerPort;

    #[test]
    fn builtin_registry_holds_four_tools() {
        let transport: Arc<dyn HttpTransport> = Arc::new(StubTransport::new());
        let registry = builtin_registry(transport, &FileConfig::default()).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.tool_ids(),
            vec!["flight_search", "image_search", "rail_search", "weather_lookup"]
        );
    }
}

//! Configuration loading
//!
//! Raw TOML structure in [`file_config`], multi-source merging in [`loader`].
//! API keys and secrets are expected from the environment
//! (`WAYPOINT_*` variables), not from checked-in files.

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileEngineConfig, FileFlightsConfig, FileHttpConfig, FileImagesConfig,
    FileRailConfig, FileWeatherConfig,
};
pub use loader::ConfigLoader;

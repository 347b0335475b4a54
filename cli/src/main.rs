//! CLI entrypoint for waypoint
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_application::{BuildGuideUseCase, ToolInvokerPort};
use waypoint_domain::{ToolRequest, TripQuery};
use waypoint_infrastructure::{
    builtin_registry, ConfigLoader, HttpTransport, RemotePlanningEngine, ReqwestTransport,
};

#[derive(Parser)]
#[command(name = "waypoint", version, about = "Travel guide tool orchestration")]
struct Cli {
    /// Path to a config file (overrides the discovered ones)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a travel guide for one trip
    Guide {
        /// IATA code of the origin airport
        #[arg(long)]
        source: String,

        /// IATA code of the destination airport
        #[arg(long)]
        destination: String,

        /// Journey date, YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// List the registered tools and their parameters
    Tools,

    /// Invoke a single tool directly (for debugging adapters)
    Invoke {
        /// Tool identifier, e.g. flight_search
        tool_id: String,

        /// Arguments as key=value pairs
        #[arg(value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config =
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?;
    for concern in config.missing_credentials() {
        warn!("{concern}");
    }

    // === Dependency Injection ===
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new(Duration::from_secs(config.http.timeout_secs))
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?,
    );
    let registry = Arc::new(
        builtin_registry(transport.clone(), &config)
            .map_err(|e| anyhow::anyhow!("failed to build tool registry: {e}"))?,
    );

    match cli.command {
        Command::Guide {
            source,
            destination,
            date,
        } => {
            let trip = TripQuery::new(source, destination, date);

            let engine = Arc::new(RemotePlanningEngine::new(
                transport,
                &config.engine.endpoint,
            ));
            let use_case = BuildGuideUseCase::new(engine, registry);

            info!("Building travel guide");
            let guide = use_case.execute(&trip).await?;
            println!("{}", guide.to_string_pretty());
        }

        Command::Tools => {
            for definition in registry.definitions() {
                println!("{}  {}", definition.id, definition.description);
                for param in &definition.parameters {
                    let requirement = if param.required { "required" } else { "optional" };
                    println!(
                        "    --{} <{}> ({})  {}",
                        param.name,
                        param.kind.as_str(),
                        requirement,
                        param.description
                    );
                }
            }
        }

        Command::Invoke { tool_id, args } => {
            if !registry.has_tool(&tool_id) {
                bail!(
                    "unknown tool '{}'; available: {}",
                    tool_id,
                    registry.tool_ids().join(", ")
                );
            }

            let mut request = ToolRequest::new(&tool_id);
            for (key, value) in args {
                // Integers pass through typed so schema checks see them as numbers
                match value.parse::<i64>() {
                    Ok(n) => request = request.with_arg(key, n),
                    Err(_) => request = request.with_arg(key, value),
                }
            }

            let result = registry.invoke(&request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

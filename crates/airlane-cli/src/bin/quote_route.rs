//! CLI tool to quote a delivery route without a running server.
//!
//! Prints the decision as JSON.

use std::time::Duration;

use airlane_cli::{build_engine, mode_policy, parse_weather, EstimatorChoice};
use airlane_core::{ClassifierRules, OperatingParameters, RouteRequest, Weather};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Quote a delivery route (restricted zones, mode, profitability, risk)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Pickup place name
    #[arg(long)]
    origin: String,

    /// Drop-off place name
    #[arg(long)]
    destination: String,

    /// City, used for the restricted-zone lookup
    #[arg(long)]
    city: Option<String>,

    /// Weather: sunny, cloudy, rainy, windy, foggy or cold
    #[arg(long, default_value = "sunny", value_parser = parse_weather)]
    weather: Weather,

    /// Payload in kg
    #[arg(long)]
    payload_kg: Option<f64>,

    /// Declared no-fly zones in the operating area
    #[arg(long)]
    no_fly_zones: Option<u32>,

    /// Seed for synthetic distances and the probability mode policy
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Hybrid selection: distance (road distance threshold) or probability
    #[arg(long, default_value = "distance")]
    mode_policy: String,

    /// Hybrid share for the probability mode policy
    #[arg(long, default_value_t = 0.5)]
    hybrid_probability: f64,

    /// Routing provider base URL (synthetic distances when omitted)
    #[arg(long, env = "AIRLANE_ROUTING_URL")]
    routing_url: Option<String>,

    /// Routing provider API key
    #[arg(long, env = "AIRLANE_ROUTING_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Estimator timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let policy = mode_policy(&args.mode_policy, args.hybrid_probability, args.seed)
        .map_err(anyhow::Error::msg)?;
    let rules = ClassifierRules::default().with_mode_policy(policy);

    let choice = match args.routing_url {
        Some(url) => EstimatorChoice::Provider {
            url,
            api_key: args.api_key,
        },
        None => {
            eprintln!("No routing URL given; using synthetic distances (seed {})", args.seed);
            EstimatorChoice::Synthetic { seed: args.seed }
        }
    };
    let engine = build_engine(&choice, rules, Duration::from_millis(args.timeout_ms.max(1)))?;

    let mut parameters = OperatingParameters::new(args.weather);
    parameters.payload_kg = args.payload_kg;
    parameters.no_fly_zone_count = args.no_fly_zones;

    let request = RouteRequest::new(
        args.origin,
        args.destination,
        args.city.as_deref(),
        parameters,
    );
    let decision = engine.decide(&request).await?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

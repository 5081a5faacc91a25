//! Helpers shared by the quoting binaries.

use std::sync::Arc;
use std::time::Duration;

use airlane_core::estimator::{DistanceEstimator, SyntheticEstimator};
use airlane_core::rules::DEFAULT_HYBRID_MIN_ROAD_KM;
use airlane_core::{
    Classifier, ClassifierRules, DecisionEngine, ModePolicy, VehicleCatalogue, Weather,
    ZoneRegistry,
};
use airlane_routing::RoutingClient;
use anyhow::{Context, Result};

/// Where distances come from.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorChoice {
    Synthetic { seed: u64 },
    Provider { url: String, api_key: Option<String> },
}

/// Parse a weather name, case-insensitively.
pub fn parse_weather(value: &str) -> Result<Weather, String> {
    match value.trim().to_lowercase().as_str() {
        "sunny" => Ok(Weather::Sunny),
        "cloudy" => Ok(Weather::Cloudy),
        "rainy" | "rain" => Ok(Weather::Rainy),
        "windy" => Ok(Weather::Windy),
        "foggy" | "fog" => Ok(Weather::Foggy),
        "cold" => Ok(Weather::Cold),
        other => Err(format!(
            "unknown weather '{}' (expected sunny, cloudy, rainy, windy, foggy or cold)",
            other
        )),
    }
}

/// Mode policy by name: `distance` or `probability`.
pub fn mode_policy(name: &str, hybrid_probability: f64, seed: u64) -> Result<ModePolicy, String> {
    match name.trim().to_lowercase().as_str() {
        "distance" => Ok(ModePolicy::DistanceThreshold {
            min_road_km: DEFAULT_HYBRID_MIN_ROAD_KM,
        }),
        "probability" => {
            if !hybrid_probability.is_finite() || !(0.0..=1.0).contains(&hybrid_probability) {
                return Err(format!(
                    "hybrid probability must be between 0 and 1, got {}",
                    hybrid_probability
                ));
            }
            Ok(ModePolicy::probability(hybrid_probability, seed))
        }
        other => Err(format!(
            "unknown mode policy '{}' (expected distance or probability)",
            other
        )),
    }
}

/// Engine over the built-in zone table.
pub fn build_engine(
    choice: &EstimatorChoice,
    rules: ClassifierRules,
    timeout: Duration,
) -> Result<DecisionEngine> {
    let zones = ZoneRegistry::builtin().context("loading built-in zone table")?;
    let estimator: Arc<dyn DistanceEstimator> = match choice {
        EstimatorChoice::Synthetic { seed } => Arc::new(SyntheticEstimator::new(*seed)),
        EstimatorChoice::Provider { url, api_key } => Arc::new(
            RoutingClient::new(url.as_str(), timeout)
                .context("creating routing client")?
                .with_api_key(api_key.clone()),
        ),
    };
    Ok(
        DecisionEngine::new(
            Arc::new(zones),
            estimator,
            Classifier::new(rules, VehicleCatalogue::default()),
        )
            .with_estimator_timeout(timeout),
    )
}

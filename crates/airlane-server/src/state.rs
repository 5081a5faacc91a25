//! Shared application state.

use std::sync::Arc;

use airlane_core::estimator::{DistanceEstimator, SyntheticEstimator};
use airlane_core::vehicles::VehicleCatalogue;
use airlane_core::zones::ZoneRegistry;
use airlane_core::{Classifier, DecisionEngine};
use airlane_routing::RoutingClient;
use anyhow::{bail, Context, Result};

use crate::config::Config;

/// Application state. Read-only after startup.
pub struct AppState {
    engine: DecisionEngine,
}

impl AppState {
    pub fn new(engine: DecisionEngine) -> Self {
        Self { engine }
    }

    /// Wire zones, estimator and classifier from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let zones = match config.zones_path.as_deref() {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading zone table {}", path))?;
                ZoneRegistry::from_json(&raw)
                    .with_context(|| format!("loading zone table {}", path))?
            }
            None => ZoneRegistry::builtin().context("loading built-in zone table")?,
        };
        tracing::info!(
            version = zones.version(),
            zones = zones.zones().len(),
            "Zone table loaded"
        );

        let estimator = build_estimator(config)?;
        let rules = config.classifier_rules();
        tracing::info!(
            policy = ?rules.mode_policy,
            break_even_km = rules.break_even_threshold_km,
            "Classifier rules"
        );
        let classifier = Classifier::new(rules, VehicleCatalogue::default());
        let engine = DecisionEngine::new(Arc::new(zones), estimator, classifier)
            .with_estimator_timeout(config.estimator_timeout());

        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }
}

fn build_estimator(config: &Config) -> Result<Arc<dyn DistanceEstimator>> {
    match config.routing_url.as_deref() {
        Some(url) => {
            let client = RoutingClient::new(url, config.estimator_timeout())
                .context("creating routing client")?
                .with_api_key(config.routing_api_key.clone());
            tracing::info!("Using routing provider at {}", client.base_url());
            Ok(Arc::new(client))
        }
        None if config.require_provider => {
            bail!("AIRLANE_REQUIRE_PROVIDER is set but AIRLANE_ROUTING_URL is not")
        }
        None => {
            tracing::warn!(
                seed = config.synthetic_seed,
                "No routing provider configured; distances are SYNTHETIC and not measured"
            );
            Ok(Arc::new(SyntheticEstimator::new(config.synthetic_seed)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[test]
    fn synthetic_by_default() {
        let state = AppState::from_config(&config()).unwrap();
        assert_eq!(state.engine().zones().zones().len(), 4);
    }

    #[test]
    fn require_provider_refuses_synthetic() {
        let mut config = config();
        config.require_provider = true;
        assert!(AppState::from_config(&config).is_err());
    }

    #[test]
    fn missing_zone_file_fails_startup() {
        let mut config = config();
        config.zones_path = Some("/nonexistent/zones.json".to_string());
        assert!(AppState::from_config(&config).is_err());
    }

    #[test]
    fn loads_zone_file() {
        let path = std::env::temp_dir().join(format!("airlane-zones-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{"version":"t1","effectiveFrom":"2025-06-01","zones":[
                {"city":"Pune","name":"Hadapsar - Baner","areaA":"hadapsar","areaB":"baner"}
            ]}"#,
        )
        .unwrap();

        let mut config = config();
        config.zones_path = Some(path.to_string_lossy().to_string());
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.engine().zones().version(), "t1");
        assert!(state.engine().zones().lookup("Pune", "Baner", "Hadapsar"));

        let _ = std::fs::remove_file(path);
    }
}

//! Server configuration from environment.

use std::env;
use std::time::Duration;

use airlane_core::rules::{
    ClassifierRules, ModePolicy, DEFAULT_BREAK_EVEN_THRESHOLD_KM, DEFAULT_HYBRID_MIN_ROAD_KM,
    DEFAULT_HYBRID_PROBABILITY,
};

/// How hybrid vs aerial-only is chosen (`AIRLANE_MODE_POLICY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    /// Hybrid from `hybrid_min_road_km` of road distance
    #[default]
    Distance,
    /// Hybrid with `hybrid_probability`, seeded by `synthetic_seed`
    Probability,
}

impl ModeSelection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "distance" | "distance_threshold" => Some(ModeSelection::Distance),
            "probability" | "random" => Some(ModeSelection::Probability),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Routing provider base URL; unset selects the synthetic estimator
    pub routing_url: Option<String>,
    pub routing_api_key: Option<String>,
    pub estimator_timeout_ms: u64,
    pub synthetic_seed: u64,
    /// Refuse to start without a routing provider
    pub require_provider: bool,
    /// Replacement zone table; the built-in table is used when unset
    pub zones_path: Option<String>,
    pub break_even_km: f64,
    pub hybrid_min_road_km: f64,
    pub mode_selection: ModeSelection,
    pub hybrid_probability: f64,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let flag = |key: &str| {
            text(key)
                .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };

        Self {
            server_port: text("AIRLANE_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            routing_url: text("AIRLANE_ROUTING_URL"),
            routing_api_key: text("AIRLANE_ROUTING_API_KEY"),
            estimator_timeout_ms: text("AIRLANE_ESTIMATOR_TIMEOUT_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            synthetic_seed: text("AIRLANE_SYNTHETIC_SEED")
                .and_then(|s| s.parse().ok())
                .unwrap_or(42),
            require_provider: flag("AIRLANE_REQUIRE_PROVIDER"),
            zones_path: text("AIRLANE_ZONES_PATH"),
            break_even_km: text("AIRLANE_BREAK_EVEN_KM")
                .and_then(|s| s.parse().ok())
                .filter(|km: &f64| km.is_finite() && *km >= 0.0)
                .unwrap_or(DEFAULT_BREAK_EVEN_THRESHOLD_KM),
            hybrid_min_road_km: text("AIRLANE_HYBRID_MIN_ROAD_KM")
                .and_then(|s| s.parse().ok())
                .filter(|km: &f64| km.is_finite() && *km >= 0.0)
                .unwrap_or(DEFAULT_HYBRID_MIN_ROAD_KM),
            mode_selection: text("AIRLANE_MODE_POLICY")
                .and_then(|s| ModeSelection::parse(&s))
                .unwrap_or_default(),
            hybrid_probability: text("AIRLANE_HYBRID_PROBABILITY")
                .and_then(|s| s.parse().ok())
                .filter(|p: &f64| p.is_finite() && (0.0..=1.0).contains(p))
                .unwrap_or(DEFAULT_HYBRID_PROBABILITY),
            log_json: flag("AIRLANE_LOG_JSON"),
        }
    }

    pub fn estimator_timeout(&self) -> Duration {
        Duration::from_millis(self.estimator_timeout_ms.max(1))
    }

    pub fn mode_policy(&self) -> ModePolicy {
        match self.mode_selection {
            ModeSelection::Distance => ModePolicy::DistanceThreshold {
                min_road_km: self.hybrid_min_road_km,
            },
            ModeSelection::Probability => {
                ModePolicy::probability(self.hybrid_probability, self.synthetic_seed)
            }
        }
    }

    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules::default()
            .with_break_even_threshold_km(self.break_even_km)
            .with_mode_policy(self.mode_policy())
    }
}

//! Classification thresholds and policies.

use serde::{Deserialize, Serialize};

/// Default break-even threshold on |road - aerial| distance, in km.
pub const DEFAULT_BREAK_EVEN_THRESHOLD_KM: f64 = 8.0;
/// Default road distance from which a ground transfer leg is planned, in km.
pub const DEFAULT_HYBRID_MIN_ROAD_KM: f64 = 15.0;
/// Default hybrid share when the probability policy is selected.
pub const DEFAULT_HYBRID_PROBABILITY: f64 = 0.5;
/// Payload above which a route counts as heavy for risk scoring, in kg.
pub const DEFAULT_PAYLOAD_RISK_KG: f64 = 10.0;
/// Declared no-fly zone count above which airspace counts as congested.
pub const DEFAULT_NO_FLY_ZONE_RISK_COUNT: u32 = 50;

/// How the classifier chooses between hybrid and aerial-only delivery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ModePolicy {
    /// Hybrid once the road distance reaches `min_road_km`.
    DistanceThreshold { min_road_km: f64 },
    /// Hybrid with `hybrid_probability`, drawn from an RNG seeded by `seed`
    /// and the distance estimate.
    Probability { hybrid_probability: f64, seed: u64 },
}

impl ModePolicy {
    /// Probability policy with `hybrid_probability` passed through [`hybrid_share`].
    pub fn probability(hybrid_probability: f64, seed: u64) -> Self {
        ModePolicy::Probability {
            hybrid_probability: hybrid_share(hybrid_probability),
            seed,
        }
    }
}

/// Usable hybrid share: clamped to `[0, 1]`, with non-finite values read as
/// [`DEFAULT_HYBRID_PROBABILITY`].
pub fn hybrid_share(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        DEFAULT_HYBRID_PROBABILITY
    }
}

impl Default for ModePolicy {
    fn default() -> Self {
        ModePolicy::DistanceThreshold {
            min_road_km: DEFAULT_HYBRID_MIN_ROAD_KM,
        }
    }
}

/// Configuration for the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRules {
    /// Routes saving less than this many km by air are break-even
    pub break_even_threshold_km: f64,
    /// Hybrid vs aerial-only selection
    pub mode_policy: ModePolicy,
    /// Let the mode policy pick hybrid in rain instead of forcing ground-only
    pub allow_hybrid_in_rain: bool,
    /// Payload risk factor threshold in kg (strictly greater than)
    pub payload_risk_kg: f64,
    /// No-fly zone count risk factor threshold (strictly greater than)
    pub no_fly_zone_risk_count: u32,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            break_even_threshold_km: DEFAULT_BREAK_EVEN_THRESHOLD_KM,
            mode_policy: ModePolicy::default(),
            allow_hybrid_in_rain: false,
            payload_risk_kg: DEFAULT_PAYLOAD_RISK_KG,
            no_fly_zone_risk_count: DEFAULT_NO_FLY_ZONE_RISK_COUNT,
        }
    }
}

impl ClassifierRules {
    pub fn with_break_even_threshold_km(mut self, km: f64) -> Self {
        self.break_even_threshold_km = km;
        self
    }

    pub fn with_mode_policy(mut self, policy: ModePolicy) -> Self {
        self.mode_policy = policy;
        self
    }
}

/// Delivery timing model used for `estimated_time_min`.
pub mod timing {
    /// Ground courier average speed.
    pub const GROUND_SPEED_KMH: f64 = 20.0;
    /// Aerial cruise speed.
    pub const AERIAL_SPEED_KMH: f64 = 60.0;
    /// Fixed hand-off time between the aerial and ground legs of a hybrid run.
    pub const HYBRID_TRANSFER_MIN: f64 = 5.0;
    /// Share of the route flown on a hybrid run.
    pub const HYBRID_AERIAL_SHARE: f64 = 0.7;
}

//! Route classification.
//!
//! Rules are evaluated in precedence order:
//! 1. restricted zone: ground-only, Loss, High
//! 2. rain: ground-only soft restriction (infeasible, Loss, High)
//! 3. aerial path: hybrid or aerial-only with a fitted vehicle
//! 4. profitability from the road-vs-air saving
//! 5. risk scoring, only for cities without a zone table
//!
//! The classifier is a pure function of its inputs. The probability mode
//! policy seeds its RNG from the configured seed and the estimate itself.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{
    Decision, DeliveryMode, DistanceEstimate, DistanceSource, OperatingParameters, Profitability,
    RiskLevel, Weather,
};
use crate::rules::{hybrid_share, timing, ClassifierRules, ModePolicy};
use crate::vehicles::VehicleCatalogue;

/// Zone lookup outcome handed to the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCheck {
    /// Route crosses a declared restricted zone
    pub restricted: bool,
    pub zone_name: Option<String>,
    /// City has a zone table; general-path risk scoring is skipped
    pub listed_city: bool,
}

impl ZoneCheck {
    /// No city, or a city without a zone table.
    pub fn general() -> Self {
        Self::default()
    }

    /// Listed city, route clear of its zones.
    pub fn clear() -> Self {
        Self {
            listed_city: true,
            ..Self::default()
        }
    }

    pub fn restricted(zone_name: impl Into<String>) -> Self {
        Self {
            restricted: true,
            zone_name: Some(zone_name.into()),
            listed_city: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: ClassifierRules,
    catalogue: VehicleCatalogue,
}

impl Classifier {
    pub fn new(rules: ClassifierRules, catalogue: VehicleCatalogue) -> Self {
        Self { rules, catalogue }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    pub fn catalogue(&self) -> &VehicleCatalogue {
        &self.catalogue
    }

    /// Classify a route. Total over non-negative distances.
    pub fn classify(
        &self,
        zone: &ZoneCheck,
        distances: DistanceEstimate,
        source: DistanceSource,
        params: &OperatingParameters,
    ) -> Decision {
        let ground_only = |feasible: bool, restricted: bool| Decision {
            feasible,
            delivery_mode: DeliveryMode::GroundOnly,
            profitability: Profitability::Loss,
            risk_level: RiskLevel::High,
            is_restricted_zone: restricted,
            recommended_altitude_m: None,
            vehicle_profile: None,
            aerial_distance_km: distances.aerial_distance_km,
            road_distance_km: distances.road_distance_km,
            estimated_time_min: estimated_time_min(DeliveryMode::GroundOnly, &distances),
            zone_name: zone.zone_name.clone(),
            distance_source: source,
            parameters: params.advisory(),
        };

        if zone.restricted {
            return ground_only(true, true);
        }

        let prefers_hybrid = self.prefers_hybrid(&distances);
        if params.weather == Weather::Rainy && !(self.rules.allow_hybrid_in_rain && prefers_hybrid)
        {
            return ground_only(false, false);
        }

        let delivery_mode = if prefers_hybrid {
            DeliveryMode::Hybrid
        } else {
            DeliveryMode::AerialOnly
        };

        let fit = self
            .catalogue
            .select(params.payload_or_zero(), distances.road_distance_km);
        let mut risk_level = if fit.qualified {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        };
        if !zone.listed_city {
            risk_level = risk_level.max(self.assess_risk(params));
        }

        let profitability = if distances.savings_km() < self.rules.break_even_threshold_km {
            Profitability::BreakEven
        } else {
            Profitability::Profitable
        };

        Decision {
            feasible: true,
            delivery_mode,
            profitability,
            risk_level,
            is_restricted_zone: false,
            recommended_altitude_m: Some(fit.profile.cruise_altitude_m),
            vehicle_profile: Some(fit.profile.name.clone()),
            aerial_distance_km: distances.aerial_distance_km,
            road_distance_km: distances.road_distance_km,
            estimated_time_min: estimated_time_min(delivery_mode, &distances),
            zone_name: None,
            distance_source: source,
            parameters: params.advisory(),
        }
    }

    /// Number of active risk factors: adverse weather, heavy payload, congested airspace.
    pub fn risk_score(&self, params: &OperatingParameters) -> usize {
        [
            params.weather.is_adverse(),
            params.payload_or_zero() > self.rules.payload_risk_kg,
            params.no_fly_zone_count.unwrap_or(0) > self.rules.no_fly_zone_risk_count,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn assess_risk(&self, params: &OperatingParameters) -> RiskLevel {
        match self.risk_score(params) {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    fn prefers_hybrid(&self, distances: &DistanceEstimate) -> bool {
        match self.rules.mode_policy {
            ModePolicy::DistanceThreshold { min_road_km } => {
                distances.road_distance_km >= min_road_km
            }
            ModePolicy::Probability {
                hybrid_probability,
                seed,
            } => {
                let mixed = seed
                    ^ distances.road_distance_km.to_bits()
                    ^ distances.aerial_distance_km.to_bits().rotate_left(32);
                let mut rng = StdRng::seed_from_u64(mixed);
                rng.random_bool(hybrid_share(hybrid_probability))
            }
        }
    }
}

fn estimated_time_min(mode: DeliveryMode, distances: &DistanceEstimate) -> u32 {
    let ground = distances.road_distance_km * 60.0 / timing::GROUND_SPEED_KMH;
    let aerial = distances.aerial_distance_km * 60.0 / timing::AERIAL_SPEED_KMH;
    let minutes = match mode {
        DeliveryMode::GroundOnly => ground,
        DeliveryMode::AerialOnly => aerial,
        DeliveryMode::Hybrid => {
            aerial * timing::HYBRID_AERIAL_SHARE
                + ground * (1.0 - timing::HYBRID_AERIAL_SHARE)
                + timing::HYBRID_TRANSFER_MIN
        }
        DeliveryMode::None => 0.0,
    };
    minutes.ceil() as u32
}

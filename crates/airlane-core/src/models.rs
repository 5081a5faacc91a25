//! Core data models for route feasibility quoting.

use serde::{Deserialize, Serialize};

/// Weather condition selected for the operating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Windy,
    Foggy,
    Cold,
}

impl Weather {
    /// Weather that counts towards the general-path risk score.
    pub fn is_adverse(self) -> bool {
        matches!(self, Weather::Rainy | Weather::Windy)
    }
}

/// Operating parameters supplied with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingParameters {
    pub weather: Weather,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_fly_zone_count: Option<u32>,
    /// Population in lakh (advisory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    /// Literacy percentage (advisory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literacy: Option<f64>,
    /// Ground elevation in meters (advisory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl OperatingParameters {
    pub fn new(weather: Weather) -> Self {
        Self {
            weather,
            payload_kg: None,
            no_fly_zone_count: None,
            population: None,
            literacy: None,
            elevation_m: None,
        }
    }

    pub fn with_payload_kg(mut self, payload_kg: f64) -> Self {
        self.payload_kg = Some(payload_kg);
        self
    }

    pub fn with_no_fly_zone_count(mut self, count: u32) -> Self {
        self.no_fly_zone_count = Some(count);
        self
    }

    /// Requested payload, with a missing value read as empty.
    pub fn payload_or_zero(&self) -> f64 {
        self.payload_kg.unwrap_or(0.0)
    }

    pub fn advisory(&self) -> AdvisoryParameters {
        AdvisoryParameters {
            population: self.population,
            literacy: self.literacy,
            elevation_m: self.elevation_m,
        }
    }
}

/// A single quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub city: Option<String>,
    pub parameters: OperatingParameters,
}

impl RouteRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        city: Option<&str>,
        parameters: OperatingParameters,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            city: city.map(str::to_string),
            parameters,
        }
    }
}

/// Which backing produced a distance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSource {
    Provider,
    Synthetic,
    Fixed,
}

/// Road and straight-line distance between origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceEstimate {
    pub aerial_distance_km: f64,
    pub road_distance_km: f64,
}

impl DistanceEstimate {
    pub fn new(aerial_distance_km: f64, road_distance_km: f64) -> Self {
        Self {
            aerial_distance_km,
            road_distance_km,
        }
    }

    /// Both distances are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.aerial_distance_km, self.road_distance_km]
            .iter()
            .all(|d| d.is_finite() && *d >= 0.0)
    }

    /// Absolute road-vs-air difference used for profitability.
    pub fn savings_km(&self) -> f64 {
        (self.road_distance_km - self.aerial_distance_km).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    GroundOnly,
    AerialOnly,
    Hybrid,
    None,
}

impl DeliveryMode {
    pub fn uses_aircraft(self) -> bool {
        matches!(self, DeliveryMode::AerialOnly | DeliveryMode::Hybrid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profitability {
    Loss,
    #[serde(rename = "Break-even")]
    BreakEven,
    Profitable,
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// Risk tier. Ordered so tiers can be combined with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Advisory inputs echoed back unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literacy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

/// Outcome of a quote. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub feasible: bool,
    pub delivery_mode: DeliveryMode,
    pub profitability: Profitability,
    pub risk_level: RiskLevel,
    pub is_restricted_zone: bool,
    pub recommended_altitude_m: Option<f64>,
    pub vehicle_profile: Option<String>,
    pub aerial_distance_km: f64,
    pub road_distance_km: f64,
    pub estimated_time_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    pub distance_source: DistanceSource,
    #[serde(default)]
    pub parameters: AdvisoryParameters,
}

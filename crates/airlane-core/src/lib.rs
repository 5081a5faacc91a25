//! Airlane core - delivery route feasibility engine
//!
//! Zone registry, distance estimation, classification and the decision
//! facade that ties them together.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod models;
pub mod rules;
pub mod spatial;
pub mod vehicles;
pub mod zones;

pub use classifier::{Classifier, ZoneCheck};
pub use engine::{DecisionEngine, DEFAULT_ESTIMATOR_TIMEOUT};
pub use error::{EngineError, EstimatorError};
pub use estimator::{DistanceEstimator, FixedEstimator, SyntheticEstimator};
pub use models::{
    AdvisoryParameters, Decision, DeliveryMode, DistanceEstimate, DistanceSource,
    OperatingParameters, Profitability, RiskLevel, RouteRequest, Weather,
};
pub use rules::{hybrid_share, ClassifierRules, ModePolicy};
pub use spatial::haversine_distance;
pub use vehicles::{VehicleCatalogue, VehicleProfile};
pub use zones::{Zone, ZoneRegistry, ZoneTable, ZoneTableError};

//! Decision facade: zone lookup, distance estimate, classification.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::classifier::{Classifier, ZoneCheck};
use crate::error::{EngineError, EstimatorError};
use crate::estimator::DistanceEstimator;
use crate::models::{Decision, RouteRequest};
use crate::zones::{normalize_place, ZoneRegistry};

/// Default bound on a single estimator call.
pub const DEFAULT_ESTIMATOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Entry point for quoting routes. Holds only read-only collaborators, so one
/// instance can serve concurrent requests behind an `Arc`.
pub struct DecisionEngine {
    zones: Arc<ZoneRegistry>,
    estimator: Arc<dyn DistanceEstimator>,
    classifier: Classifier,
    estimator_timeout: Duration,
}

impl DecisionEngine {
    pub fn new(
        zones: Arc<ZoneRegistry>,
        estimator: Arc<dyn DistanceEstimator>,
        classifier: Classifier,
    ) -> Self {
        Self {
            zones,
            estimator,
            classifier,
            estimator_timeout: DEFAULT_ESTIMATOR_TIMEOUT,
        }
    }

    pub fn with_estimator_timeout(mut self, timeout: Duration) -> Self {
        self.estimator_timeout = timeout;
        self
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Quote a route.
    ///
    /// Dropping the returned future abandons the in-flight estimator call.
    pub async fn decide(&self, request: &RouteRequest) -> Result<Decision, EngineError> {
        validate(request)?;

        let city = request.city.as_deref().map(normalize_place);
        let span = tracing::info_span!("decide", city = city.as_deref().unwrap_or("-"));

        self.decide_in_city(city.as_deref(), request)
            .instrument(span)
            .await
    }

    async fn decide_in_city(
        &self,
        city: Option<&str>,
        request: &RouteRequest,
    ) -> Result<Decision, EngineError> {
        let zone = self.check_zones(city, request);

        let distances = tokio::time::timeout(
            self.estimator_timeout,
            self.estimator.estimate(&request.origin, &request.destination),
        )
        .await
        .map_err(|_| EstimatorError::Timeout(self.estimator_timeout))
        .and_then(|result| result)
        .map_err(|err| {
            tracing::warn!("Distance estimate failed: {}", err);
            EngineError::EstimatorUnavailable(err)
        })?;

        if !distances.is_valid() {
            tracing::error!(
                aerial_km = distances.aerial_distance_km,
                road_km = distances.road_distance_km,
                "Estimator returned invalid distances"
            );
            return Err(EngineError::InternalFault(
                "estimator returned negative or non-finite distance".to_string(),
            ));
        }

        let decision = self.classifier.classify(
            &zone,
            distances,
            self.estimator.source(),
            &request.parameters,
        );

        tracing::info!(
            restricted = decision.is_restricted_zone,
            mode = ?decision.delivery_mode,
            aircraft = decision.delivery_mode.uses_aircraft(),
            risk = ?decision.risk_level,
            profitability = ?decision.profitability,
            "Route quoted"
        );
        Ok(decision)
    }

    fn check_zones(&self, city: Option<&str>, request: &RouteRequest) -> ZoneCheck {
        let Some(city) = city else {
            return ZoneCheck::general();
        };
        if !self.zones.has_city(city) {
            return ZoneCheck::general();
        }
        match self.zones.find(city, &request.origin, &request.destination) {
            Some(zone) => ZoneCheck::restricted(zone.name.clone()),
            None => ZoneCheck::clear(),
        }
    }
}

fn validate(request: &RouteRequest) -> Result<(), EngineError> {
    if normalize_place(&request.origin).is_empty() {
        return Err(EngineError::invalid("origin is required"));
    }
    if normalize_place(&request.destination).is_empty() {
        return Err(EngineError::invalid("destination is required"));
    }
    if let Some(city) = request.city.as_deref() {
        if normalize_place(city).is_empty() {
            return Err(EngineError::invalid("city must not be blank when provided"));
        }
    }
    if let Some(payload) = request.parameters.payload_kg {
        if !payload.is_finite() || payload < 0.0 {
            return Err(EngineError::invalid("payloadKg must be a non-negative number"));
        }
    }
    Ok(())
}

//! Routing provider HTTP client.

use std::time::Duration;

use airlane_core::error::EstimatorError;
use airlane_core::estimator::DistanceEstimator;
use airlane_core::models::{DistanceEstimate, DistanceSource};
use airlane_core::spatial::path_span_km;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("routing request timed out after {0:?}")]
    Timeout(Duration),

    #[error("routing request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("routing provider returned HTTP {0}")]
    Status(u16),

    #[error("routing provider returned an unusable route: {0}")]
    InvalidRoute(String),
}

impl From<RoutingError> for EstimatorError {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::Timeout(after) => EstimatorError::Timeout(after),
            RoutingError::Status(code) => EstimatorError::Status(code),
            RoutingError::InvalidRoute(reason) => EstimatorError::InvalidRoute(reason),
            other => EstimatorError::Transport(other.to_string()),
        }
    }
}

/// Route as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderRoute {
    /// Road distance along the route in meters
    pub distance_m: f64,
    /// Waypoints as [lat, lon] pairs, origin first
    pub path: Vec<[f64; 2]>,
}

/// HTTP client for a routing/geocoding provider.
///
/// Calls `GET {base_url}/v1/route?origin=..&destination=..` and turns the
/// returned path into a [`DistanceEstimate`].
pub struct RoutingClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl RoutingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RoutingError::Build)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the provider's route between two places.
    pub async fn fetch_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ProviderRoute, RoutingError> {
        let url = format!("{}/v1/route", self.base_url);
        let mut request = self
            .client
            .get(&url)
            .query(&[("origin", origin), ("destination", destination)]);
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|err| self.classify(err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Status(status.as_u16()));
        }

        response
            .json::<ProviderRoute>()
            .await
            .map_err(|err| self.classify(err))
    }

    /// Road and aerial distance for a pair of places.
    ///
    /// Aerial distance is the great-circle span between the path's endpoints,
    /// capped at the road distance.
    pub async fn distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceEstimate, RoutingError> {
        let route = self.fetch_route(origin, destination).await?;

        if !route.distance_m.is_finite() || route.distance_m < 0.0 {
            return Err(RoutingError::InvalidRoute(format!(
                "distance_m = {}",
                route.distance_m
            )));
        }
        let road_km = route.distance_m / 1000.0;
        let span_km = path_span_km(&route.path)
            .ok_or_else(|| RoutingError::InvalidRoute("empty path".to_string()))?;

        let aerial_km = if span_km > road_km {
            tracing::warn!(
                span_km,
                road_km,
                "Route path span exceeds road distance; capping aerial distance"
            );
            road_km
        } else {
            span_km
        };

        Ok(DistanceEstimate::new(aerial_km, road_km))
    }

    fn classify(&self, err: reqwest::Error) -> RoutingError {
        if err.is_timeout() {
            RoutingError::Timeout(self.timeout)
        } else if err.is_decode() {
            RoutingError::InvalidRoute(err.to_string())
        } else {
            RoutingError::Http(err)
        }
    }
}

#[async_trait]
impl DistanceEstimator for RoutingClient {
    async fn estimate(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceEstimate, EstimatorError> {
        let estimate = self.distance(origin, destination).await?;
        tracing::debug!(
            aerial_km = estimate.aerial_distance_km,
            road_km = estimate.road_distance_km,
            "Provider distance estimate"
        );
        Ok(estimate)
    }

    fn source(&self) -> DistanceSource {
        DistanceSource::Provider
    }
}

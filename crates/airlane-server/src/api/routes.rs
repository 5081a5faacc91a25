//! REST API routes.

use std::sync::Arc;

use airlane_core::rules::ClassifierRules;
use airlane_core::vehicles::VehicleProfile;
use airlane_core::zones::ZoneTable;
use airlane_core::{Decision, RouteRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/route-analysis", post(analyze_route))
        .route("/v1/zones", get(list_zones))
        .route("/v1/vehicles", get(list_vehicles))
        .route("/v1/rules", get(get_rules))
}

/// Quote a delivery route.
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Decision>, ApiError> {
    let Json(request) = payload?;
    let decision = state.engine().decide(&request).await?;
    Ok(Json(decision))
}

/// Loaded restricted-zone table.
pub async fn list_zones(State(state): State<Arc<AppState>>) -> Json<ZoneTable> {
    Json(state.engine().zones().table().clone())
}

/// Vehicle catalogue used for recommendations.
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<VehicleProfile>> {
    Json(state.engine().classifier().catalogue().profiles().to_vec())
}

/// Active classification thresholds.
pub async fn get_rules(State(state): State<Arc<AppState>>) -> Json<ClassifierRules> {
    Json(state.engine().classifier().rules().clone())
}

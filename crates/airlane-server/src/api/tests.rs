use std::sync::Arc;
use std::time::Duration;

use airlane_core::estimator::{DistanceEstimator, FixedEstimator, SyntheticEstimator};
use airlane_core::zones::ZoneRegistry;
use airlane_core::{Classifier, DecisionEngine};
use airlane_routing::RoutingClient;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

fn setup_app(estimator: Arc<dyn DistanceEstimator>) -> Router {
    let engine = DecisionEngine::new(
        Arc::new(ZoneRegistry::builtin().expect("builtin zones")),
        estimator,
        Classifier::default(),
    );
    api::app(Arc::new(AppState::new(engine)))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn analysis_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/route-analysis")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn restricted_zone_route_is_ground_only() {
    let app = setup_app(Arc::new(SyntheticEstimator::new(42)));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Powai warehouse",
            "destination": "Santacruz East hub",
            "city": "Mumbai",
            "parameters": { "weather": "Sunny", "payloadKg": 1.5 }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["isRestrictedZone"], json!(true));
    assert_eq!(body["deliveryMode"], json!("ground-only"));
    assert_eq!(body["profitability"], json!("Loss"));
    assert_eq!(body["riskLevel"], json!("High"));
    assert_eq!(body["vehicleProfile"], Value::Null);
    assert_eq!(body["distanceSource"], json!("synthetic"));
    assert_eq!(body["zoneName"], json!("Powai - Santacruz East corridor"));
}

#[tokio::test]
async fn clear_route_gets_vehicle_and_altitude() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Jayanagar",
            "destination": "Koramangala",
            "city": "Bangalore",
            "parameters": { "weather": "Cloudy", "population": 120, "literacy": 88 }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["feasible"], json!(true));
    assert_eq!(body["deliveryMode"], json!("hybrid"));
    assert_eq!(body["profitability"], json!("Profitable"));
    assert_eq!(body["riskLevel"], json!("Low"));
    assert_eq!(body["vehicleProfile"], json!("Wing (Alphabet Inc.)"));
    assert_eq!(body["recommendedAltitudeM"], json!(120.0));
    assert_eq!(body["aerialDistanceKm"], json!(8.0));
    assert_eq!(body["roadDistanceKm"], json!(18.0));
    assert_eq!(body["parameters"]["population"], json!(120.0));
}

#[tokio::test]
async fn rain_in_unknown_city_is_soft_restricted() {
    let app = setup_app(Arc::new(SyntheticEstimator::new(42)));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Civil Lines",
            "destination": "Rajouri Garden",
            "parameters": { "weather": "Rainy", "payloadKg": 2 }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["isRestrictedZone"], json!(false));
    assert_eq!(body["feasible"], json!(false));
    assert_eq!(body["deliveryMode"], json!("ground-only"));
    assert_eq!(body["profitability"], json!("Loss"));
}

#[tokio::test]
async fn blank_origin_is_bad_request() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "  ",
            "destination": "Trombay",
            "city": "Mumbai",
            "parameters": { "weather": "Sunny" }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], json!("invalid_request"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Powai",
            "destination": "Trombay",
            "parameters": { "weather": "Hail" }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], json!("invalid_request"));
}

#[tokio::test]
async fn unreachable_provider_is_bad_gateway() {
    let client = RoutingClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let app = setup_app(Arc::new(client));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Powai",
            "destination": "Andheri",
            "city": "Mumbai",
            "parameters": { "weather": "Sunny" }
        })))
        .await
        .unwrap();

    assert!(matches!(
        response.status(),
        StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT
    ));
    let body = read_json(response).await;
    assert_eq!(body["error"], json!("estimator_unavailable"));
}

#[tokio::test]
async fn lists_zones_and_vehicles() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let zones = app
        .clone()
        .oneshot(Request::get("/v1/zones").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(zones.status(), StatusCode::OK);
    let zones = read_json(zones).await;
    assert_eq!(zones["version"], json!("2025.1"));
    assert_eq!(zones["zones"].as_array().map(Vec::len), Some(4));

    let vehicles = app
        .clone()
        .oneshot(Request::get("/v1/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let vehicles = read_json(vehicles).await;
    assert_eq!(vehicles.as_array().map(Vec::len), Some(10));

    let rules = app
        .oneshot(Request::get("/v1/rules").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let rules = read_json(rules).await;
    assert_eq!(rules["break_even_threshold_km"], json!(8.0));
    assert_eq!(rules["mode_policy"]["policy"], json!("distance_threshold"));
}

#[tokio::test]
async fn rules_reflect_configured_probability_policy() {
    let config = Config::from_lookup(|key| match key {
        "AIRLANE_MODE_POLICY" => Some("probability".to_string()),
        "AIRLANE_HYBRID_PROBABILITY" => Some("0.25".to_string()),
        "AIRLANE_SYNTHETIC_SEED" => Some("11".to_string()),
        _ => None,
    });
    let app = api::app(Arc::new(AppState::from_config(&config).unwrap()));

    let response = app
        .oneshot(Request::get("/v1/rules").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rules = read_json(response).await;
    assert_eq!(rules["mode_policy"]["policy"], json!("probability"));
    assert_eq!(rules["mode_policy"]["hybrid_probability"], json!(0.25));
    assert_eq!(rules["mode_policy"]["seed"], json!(11));
}

#[tokio::test]
async fn probability_policy_quotes_aerial_only_routes() {
    let config = Config::from_lookup(|key| match key {
        "AIRLANE_MODE_POLICY" => Some("probability".to_string()),
        "AIRLANE_HYBRID_PROBABILITY" => Some("0".to_string()),
        _ => None,
    });
    let app = api::app(Arc::new(AppState::from_config(&config).unwrap()));

    let response = app
        .oneshot(analysis_request(json!({
            "origin": "Jayanagar",
            "destination": "Koramangala",
            "city": "Bangalore",
            "parameters": { "weather": "Sunny" }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["deliveryMode"], json!("aerial-only"));
    assert_eq!(body["distanceSource"], json!("synthetic"));
}

#[tokio::test]
async fn published_zones_keep_loaded_spelling() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let response = app
        .oneshot(Request::get("/v1/zones").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let zones = read_json(response).await;
    assert_eq!(zones["zones"][0]["city"], json!("Mumbai"));
    assert_eq!(zones["zones"][0]["areaB"], json!("Santacruz East"));
}

#[tokio::test]
async fn echoes_request_id() {
    let app = setup_app(Arc::new(FixedEstimator::new(8.0, 18.0)));

    let response = app
        .clone()
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "quote-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "quote-123"
    );

    let generated = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(generated.headers().contains_key("x-request-id"));
}

//! Airlane routing - routing provider client
//!
//! Backs the engine's distance estimator with a real routing/geocoding service.

pub mod client;

pub use client::{ProviderRoute, RoutingClient, RoutingError, DEFAULT_REQUEST_TIMEOUT};

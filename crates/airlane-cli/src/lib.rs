//! Airlane CLI - command line tools for quoting delivery routes.
//!
//! Binaries:
//! - quote_route: run the decision engine in-process for one route

pub mod quote;

pub use quote::{build_engine, mode_policy, parse_weather, EstimatorChoice};

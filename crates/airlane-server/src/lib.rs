//! Shared library surface for the airlane server and its tests.

pub mod api;
pub mod config;
pub mod state;

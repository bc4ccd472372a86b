//! Load-test scenarios for the MLflow tracking server REST API.
//!
//! This crate provides the building blocks an external load-generation
//! harness drives against a tracking server: a configuration resolver for
//! the target endpoint, request builders for the experiment/run endpoints,
//! and three ready-made scenarios (run creation, experiment search, run
//! search) implementing the [`scenario::LoadScenario`] contract. The
//! scheduling of virtual users, test duration, and result reporting all
//! belong to the embedding harness, not to this crate.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod scenario;
pub mod telemetry;

pub use client::TrackingClient;
pub use config::Config;
pub use error::Error;
pub use scenario::{
    CreateRunScenario, ExperimentContext, LoadScenario, SearchExperimentsScenario,
    SearchRunsScenario,
};

//! Telemetry aggregation
//!
//! Loads an immutable dataset of per-region latency/uptime samples and serves
//! summary statistics (mean and p95 latency, mean uptime, threshold breaches)
//! over HTTP.

pub mod api_server;
pub mod models;
pub mod service;
pub mod stats;
pub mod store;

pub use api_server::TelemetryApiServer;
pub use models::*;
pub use service::AggregationService;
pub use store::TelemetryStore;

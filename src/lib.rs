//! # Telemetry Aggregator
//!
//! A small HTTP service that answers per-region latency and uptime summaries
//! over a telemetry dataset loaded once at startup.
//!
//! ## Usage
//!
//! ```bash
//! telemetry-aggregator [--config aggregator.toml] [--dataset telemetry.json] [--port 8000]
//! ```
//!
//! ## Modules
//!
//! - `config` - Configuration from TOML, environment and CLI overrides
//! - `error` - Unified error type with stable error codes
//! - `telemetry` - Dataset store, statistics, aggregation service and API server
pub mod config;
pub mod error;
pub mod telemetry;

pub use config::Config;
pub use error::{AggregatorError, ErrorCode};
pub use telemetry::{AggregationService, TelemetryApiServer, TelemetryStore};

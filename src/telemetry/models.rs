//! Data models for telemetry aggregation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single latency/uptime sample for a region
///
/// Fields beyond these three are ignored when the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub region: String,
    pub latency_ms: f64,
    pub uptime_pct: f64,
}

impl TelemetryRecord {
    pub fn new(region: impl Into<String>, latency_ms: f64, uptime_pct: f64) -> Self {
        Self {
            region: region.into(),
            latency_ms,
            uptime_pct,
        }
    }
}

/// Body of `POST /api`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub regions: Vec<String>,
    pub threshold_ms: i64,
}

/// Summary statistics for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub avg_latency: f64,
    pub p95_latency: f64,
    pub avg_uptime: f64,
    pub breaches: u64,
}

/// Response of `POST /api`, keyed by region in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResponse {
    pub regions: IndexMap<String, RegionStats>,
}

impl AggregationResponse {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, region: &str) -> Option<&RegionStats> {
        self.regions.get(region)
    }
}

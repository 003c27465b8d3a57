//! Per-region aggregation over the telemetry store

use super::models::{AggregationResponse, RegionStats};
use super::store::TelemetryStore;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Computes [`RegionStats`] for requested regions against an injected dataset
#[derive(Debug, Clone)]
pub struct AggregationService {
    store: Arc<TelemetryStore>,
}

impl AggregationService {
    pub fn new(store: Arc<TelemetryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    /// Aggregate statistics for each region, in request order.
    ///
    /// Regions without records are left out of the result. A region named
    /// twice is computed twice and the later entry replaces the earlier one.
    pub fn aggregate(&self, regions: &[String], threshold_ms: i64) -> Result<AggregationResponse> {
        let mut response = AggregationResponse::default();

        for region in regions {
            let records = self.store.records_for_region(region);
            match RegionStats::from_records(&records, threshold_ms)? {
                Some(stats) => {
                    response.regions.insert(region.clone(), stats);
                }
                None => debug!("No telemetry for region '{}', skipping", region),
            }
        }

        Ok(response)
    }
}

//! Pure statistics over telemetry samples

use super::models::{RegionStats, TelemetryRecord};
use crate::error::{AggregatorError, ErrorCode, Result};

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentile `p` (0-100) using linear interpolation between the closest ranks.
///
/// The fractional rank is `p / 100 * (n - 1)` over the ascending-sorted values;
/// the result lies between the two order statistics that bracket it.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Round to two decimal places.
///
/// Rounds the exact binary value of `value`, so `100.005` (stored just below
/// the half) becomes `100.0` and exact halves go to the even digit.
/// Scaling by 100 first would round the inexact product instead.
pub fn round2(value: f64) -> Result<f64> {
    let formatted = format!("{:.2}", value);
    formatted.parse().map_err(|e| {
        AggregatorError::aggregation(
            ErrorCode::AGGREGATION_ROUNDING,
            format!("Cannot round {} to two decimals", value),
        )
        .with_source(e)
    })
}

impl RegionStats {
    /// Summarize one region's records; `Ok(None)` when there are no records.
    pub fn from_records(
        records: &[&TelemetryRecord],
        threshold_ms: i64,
    ) -> Result<Option<Self>> {
        let latencies: Vec<f64> = records.iter().map(|r| r.latency_ms).collect();
        let uptimes: Vec<f64> = records.iter().map(|r| r.uptime_pct).collect();

        let (Some(avg_latency), Some(p95_latency), Some(avg_uptime)) = (
            mean(&latencies),
            percentile(&latencies, 95.0),
            mean(&uptimes),
        ) else {
            return Ok(None);
        };

        let threshold = threshold_ms as f64;
        let breaches = latencies.iter().filter(|&&l| l > threshold).count() as u64;

        Ok(Some(Self {
            avg_latency: round2(avg_latency)?,
            p95_latency: round2(p95_latency)?,
            avg_uptime: round2(avg_uptime)?,
            breaches,
        }))
    }
}

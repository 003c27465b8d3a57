//! Immutable in-memory telemetry dataset

use super::models::TelemetryRecord;
use crate::error::{AggregatorError, ErrorCode, Result};
use indexmap::IndexSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read-only store of telemetry records, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    records: Vec<TelemetryRecord>,
}

impl TelemetryStore {
    /// Build a store from records already in memory
    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a JSON array of records on disk.
    ///
    /// Any failure here is fatal to startup; there is no partial load.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading telemetry dataset from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            let code = match e.kind() {
                ErrorKind::NotFound => ErrorCode::DATASET_NOT_FOUND,
                _ => ErrorCode::DATASET_READ_FAILED,
            };
            AggregatorError::dataset_with_code(
                code,
                format!("Failed to read {}", path.display()),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        let records: Vec<TelemetryRecord> =
            serde_json::from_str(&content).map_err(|e| invalid_dataset(e, Some(path)))?;
        let store = Self::from_records(records);

        if store.is_empty() {
            warn!("Telemetry dataset {} contains no records", path.display());
        } else {
            info!(
                "Loaded {} telemetry records across {} regions from {}",
                store.len(),
                store.regions().len(),
                path.display()
            );
        }

        Ok(store)
    }

    /// Parse the dataset from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let records: Vec<TelemetryRecord> =
            serde_json::from_str(content).map_err(|e| invalid_dataset(e, None))?;
        Ok(Self::from_records(records))
    }

    /// All records for `region`, in dataset order
    pub fn records_for_region(&self, region: &str) -> Vec<&TelemetryRecord> {
        self.records.iter().filter(|r| r.region == region).collect()
    }

    /// Distinct region names in first-seen order
    pub fn regions(&self) -> IndexSet<&str> {
        self.records.iter().map(|r| r.region.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn invalid_dataset(err: serde_json::Error, path: Option<&Path>) -> AggregatorError {
    let message = match path {
        Some(p) => format!("Invalid telemetry dataset {}: {}", p.display(), err),
        None => format!("Invalid telemetry dataset: {}", err),
    };
    AggregatorError::dataset_with_code(
        ErrorCode::DATASET_INVALID_JSON,
        message,
        path.map(Path::to_path_buf),
    )
    .with_source(err)
}

//! Common test utilities and helpers

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use telemetry_aggregator::config::ServerConfig;
use telemetry_aggregator::telemetry::TelemetryRecord;
use telemetry_aggregator::{AggregationService, TelemetryApiServer, TelemetryStore};
use tempfile::TempDir;
use tower::ServiceExt;

/// Two "us" samples: mean 150, p95 195, uptime 99.7
pub fn scenario_records() -> Vec<TelemetryRecord> {
    vec![
        TelemetryRecord::new("us", 100.0, 99.9),
        TelemetryRecord::new("us", 200.0, 99.5),
    ]
}

/// Router over an in-memory dataset
pub fn app_with_records(records: Vec<TelemetryRecord>) -> Router {
    let store = Arc::new(TelemetryStore::from_records(records));
    let service = Arc::new(AggregationService::new(store));
    TelemetryApiServer::new(service, ServerConfig::default()).router()
}

/// Write a dataset file into a fresh temp dir
pub fn write_dataset(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("telemetry.json");
    std::fs::write(&path, content).expect("write dataset");
    (temp_dir, path)
}

/// POST a raw JSON body to `/api` and decode the response
pub async fn post_api(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/api")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

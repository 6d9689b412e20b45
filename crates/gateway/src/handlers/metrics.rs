//! Prometheus scrape endpoint

use axum::extract::State;
use citenet_common::errors::{AppError, Result};
use crate::AppState;

/// Render the recorder's current metrics in Prometheus text format
pub async fn metrics(State(state): State<AppState>) -> Result<String> {
    state
        .metrics
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::NotFound {
            resource_type: "metrics recorder".to_string(),
            id: "prometheus".to_string(),
        })
}

//! Metrics collection for complaint-service.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; the
//! helpers below count domain events. Everything is rendered through one
//! Prometheus recorder.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_user_registered() {
    counter!("users_registered_total").increment(1);
}

pub fn record_complaint_submitted() {
    counter!("complaints_submitted_total").increment(1);
}

pub fn record_complaint_resolved() {
    counter!("complaints_resolved_total").increment(1);
}

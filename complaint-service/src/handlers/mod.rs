//! HTTP handlers for complaint-service.

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod metrics;

pub use admin::{list_all_complaints, resolve_complaint};
pub use auth::{login, logout, register};
pub use complaints::{list_user_complaints, submit_complaint, view_complaint};

use axum::extract::{rejection::QueryRejection, Query};
use service_core::error::AppError;

use crate::dtos::complaints::ComplaintQuery;

/// Method fallback for every mounted route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not Found"))
}

/// Pull the required `complaintID` query parameter.
pub(crate) fn complaint_id_from(
    query: Result<Query<ComplaintQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    query
        .complaint_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("complaintID query parameter is required")))
}

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::{
    dtos::{complaints::ComplaintQuery, ApiResponse},
    AppState,
};

use super::complaint_id_from;

pub async fn list_all_complaints(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let complaints = state.complaints.all_complaints().await?;
    ApiResponse::ok("all complaints", &complaints)
}

pub async fn resolve_complaint(
    State(state): State<AppState>,
    query: Result<Query<ComplaintQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let complaint_id = complaint_id_from(query)?;
    let complaint = state.complaints.resolve_complaint(&complaint_id).await?;

    ApiResponse::ok("Resolved successfully", &complaint)
}

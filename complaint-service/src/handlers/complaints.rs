use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::{
    dtos::{
        complaints::{ComplaintQuery, SubmitComplaintRequest},
        ApiResponse,
    },
    middleware::SessionUser,
    services::NewComplaint,
    utils::ValidatedJson,
    AppState,
};

use super::complaint_id_from;

pub async fn submit_complaint(
    State(state): State<AppState>,
    session: SessionUser,
    ValidatedJson(req): ValidatedJson<SubmitComplaintRequest>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = state
        .complaints
        .submit_complaint(
            &session.user_id,
            NewComplaint {
                title: req.title,
                summary: req.summary,
                rating: req.rating,
            },
        )
        .await?;

    ApiResponse::created("complain was successfully created", &complaint)
}

pub async fn view_complaint(
    State(state): State<AppState>,
    session: SessionUser,
    query: Result<Query<ComplaintQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let complaint_id = complaint_id_from(query)?;
    let complaint = state
        .complaints
        .view_complaint(&session.user_id, &complaint_id)
        .await?;

    ApiResponse::ok("complaint found", &complaint)
}

pub async fn list_user_complaints(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<impl IntoResponse, AppError> {
    let complaints = state
        .complaints
        .complaints_for_user(&session.user_id)
        .await?;

    ApiResponse::ok("complaints for user", &complaints)
}

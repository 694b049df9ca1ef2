use axum::{extract::State, response::IntoResponse};
use service_core::error::AppError;

use crate::{
    dtos::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        ApiResponse,
    },
    middleware::SessionUser,
    utils::ValidatedJson,
    AppState,
};

/// Register a new user and hand back their generated id and secret code.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.complaints.register(req.name, req.email).await?;
    ApiResponse::created("New user sign-up", &user)
}

/// Exchange a secret code for a session token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.complaints.login(&req.secret_code).await?;
    let session = state.sessions.issue(&user.id)?;

    ApiResponse::ok(
        "user sign-in successfully",
        &LoginResponse {
            user,
            session_token: session.token,
            expires_at: session.expires_at,
        },
    )
}

pub async fn logout(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    state.sessions.revoke(&session.token);
    tracing::info!(user_id = %session.user_id, "User signed out");
    ApiResponse::message("user sign-out successfully")
}

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use service_core::error::AppError;

use crate::AppState;

/// The user behind the request's `Authorization: Bearer <session token>`.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: String,
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
            })?;

        let user_id = state.sessions.resolve(token).ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Invalid or expired session"))
        })?;

        Ok(SessionUser {
            user_id,
            token: token.to_string(),
        })
    }
}

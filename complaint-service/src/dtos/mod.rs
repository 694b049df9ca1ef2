pub mod auth;
pub mod complaints;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;

/// Success body: `{ "success": true, "message": ..., "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Envelope,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(message: &str, data: &T) -> Result<Self, AppError> {
        Self::with_data(StatusCode::OK, message, data)
    }

    pub fn created<T: Serialize>(message: &str, data: &T) -> Result<Self, AppError> {
        Self::with_data(StatusCode::CREATED, message, data)
    }

    pub fn message(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope {
                success: true,
                message: message.to_string(),
                data: None,
            },
        }
    }

    fn with_data<T: Serialize>(
        status: StatusCode,
        message: &str,
        data: &T,
    ) -> Result<Self, AppError> {
        Ok(Self {
            status,
            body: Envelope {
                success: true,
                message: message.to_string(),
                data: Some(serde_json::to_value(data)?),
            },
        })
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

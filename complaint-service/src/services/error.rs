use service_core::error::AppError;
use thiserror::Error;

use super::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Complaint not found")]
    ComplaintNotFound,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("No unused {0} after {1} attempts")]
    IdSpaceExhausted(&'static str, u32),

    #[error("Session expiry is out of range")]
    SessionExpiryOutOfRange,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => AppError::InternalError(anyhow::Error::new(e)),
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Wrong secret code/user not found"))
            }
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
            ServiceError::ComplaintNotFound => {
                AppError::NotFound(anyhow::anyhow!("Complaint Not Found"))
            }
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict(anyhow::anyhow!("User already exist"))
            }
            e @ (ServiceError::IdSpaceExhausted(..) | ServiceError::SessionExpiryOutOfRange) => {
                AppError::InternalError(anyhow::Error::new(e))
            }
        }
    }
}

use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;
use tracing::error;

pub const USER_NOT_INFORMED: &str = "User not informed";
pub const ASSET_NOT_FOUND: &str = "Fixed income asset not found";
pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    /// A domain precondition was violated by caller-supplied data.
    #[error("{0}")]
    BusinessRule(String),
    #[error("{}", ASSET_NOT_FOUND)]
    AssetNotFound,
    #[error("{}", USER_NOT_FOUND)]
    UserNotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::AssetNotFound => (StatusCode::NOT_FOUND, ASSET_NOT_FOUND).into_response(),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, USER_NOT_FOUND).into_response(),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            AppError::Db(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Db(value)
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use studydesk_core::AdminError;
use studydesk_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid token")]
    Unauthorized,

    #[error("Administrator access required")]
    Forbidden,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("User not found")]
    NotFound,

    #[error("Internal server error")]
    Internal,

    #[error(transparent)]
    Admin(#[from] AdminError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden | ApiError::AccountDisabled => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Admin(AdminError::Validation(reason)) => (StatusCode::BAD_REQUEST, reason.to_string()),
            ApiError::Admin(e) => {
                error!("{:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

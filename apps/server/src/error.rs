use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calendar_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("Conflict")]
    Conflict,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) if e.is_validation() => {
                tracing::warn!("Request rejected: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Core(e) => {
                tracing::error!("Unhandled error while processing request: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Conflict => (StatusCode::CONFLICT, self.to_string()),
            ApiError::BadRequest(reason) => {
                tracing::warn!("Request rejected: {}", reason);
                (StatusCode::BAD_REQUEST, reason.clone())
            }
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

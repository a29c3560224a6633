//! HTTP Error Handling
//!
//! 所有错误响应共用同一个信封：`{"error": {"message", "type": "error", "code"}}`

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 错误信封
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: u16,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                kind: "error",
                code: status.as_u16(),
            },
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!(code = status.as_u16(), error = %msg, "Unauthorized");
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(code = status.as_u16(), error = %msg, "Bad request");
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(code = status.as_u16(), error = %msg, "Resource not found");
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(code = status.as_u16(), error = %msg, "Payload too large");
            }
            ApiError::Internal(msg) => {
                tracing::error!(code = status.as_u16(), error = %msg, "Internal server error");
            }
        }

        (status, Json(ErrorEnvelope::new(status, self.message()))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Request body too large".to_string())
        } else {
            ApiError::BadRequest("Invalid JSON in request body".to_string())
        }
    }
}

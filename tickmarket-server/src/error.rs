//! HTTP error type.
//!
//! Engine and auth errors map onto a status code and a `{"error", "status"}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tickmarket_core::EngineError;

use crate::auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad parameters or a business-rule rejection (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid, or unknown token (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Operation disabled by configuration (403).
    #[error("{0}")]
    Forbidden(String),

    /// Invariant violation inside the engine (500).
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::InvalidRequest(_)
            | EngineError::UnknownAction(_)
            | EngineError::InsufficientFunds { .. }
            | EngineError::InsufficientHoldings { .. } => AppError::BadRequest(message),
            EngineError::Unauthorized => AppError::Unauthorized(message),
            EngineError::ResetRejected => AppError::Forbidden(message),
            EngineError::OutOfRange { .. } => AppError::Internal(message),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::Issue(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

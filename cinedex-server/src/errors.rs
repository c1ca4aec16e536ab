use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cinedex_core::CatalogError;
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// Request input the server rejects before it reaches the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("error parsing id, not an int")]
    InvalidId,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => Self::not_found(err.to_string()),
            CatalogError::Timeout { .. } => {
                warn!(error = %err, "catalog query timed out");
                Self::gateway_timeout(err.to_string())
            }
            CatalogError::Connection(_) => {
                error!(error = %err, "catalog storage unavailable");
                Self::internal("database unavailable")
            }
            CatalogError::Database(_) => {
                error!(error = %err, "catalog query failed");
                Self::internal("database error")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn catalog_errors_map_to_status_codes() {
        let cases = [
            (CatalogError::not_found("movie 9999"), StatusCode::NOT_FOUND),
            (
                CatalogError::Timeout {
                    operation: "read_all_movies",
                    after: Duration::from_secs(3),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                CatalogError::Connection("refused".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status, expected);
        }
    }

    #[test]
    fn invalid_id_is_a_bad_request() {
        let err = AppError::from(ValidationError::InvalidId);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "error parsing id, not an int");
    }
}

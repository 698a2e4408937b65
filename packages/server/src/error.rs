use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::database::StorageError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `NOT_FOUND`, `CONFLICT`,
    /// `DATABASE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "DATABASE_UNAVAILABLE")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "The database is temporarily unavailable")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(String),
    /// The connection pool could not reach the database.
    DatabaseUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::DatabaseUnavailable(detail) => {
                tracing::error!("Database unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "DATABASE_UNAVAILABLE",
                        message: "The database is temporarily unavailable".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(e) => AppError::DatabaseUnavailable(e.to_string()),
            StorageError::ConstraintViolation(detail) => {
                tracing::warn!("Constraint violation: {detail}");
                AppError::Conflict(detail)
            }
            StorageError::Query(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        StorageError::from(err).into()
    }
}

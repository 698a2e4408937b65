pub mod problem;
pub mod root;

use crate::error::AppError;

/// Fallback for paths that match no route.
pub async fn not_found() -> AppError {
    AppError::NotFound("No such route".into())
}

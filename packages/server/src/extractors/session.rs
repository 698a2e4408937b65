use axum::{extract::FromRequestParts, http::request::Parts};

use crate::database::DbSession;
use crate::error::AppError;
use crate::state::AppState;

/// Opens a fresh `DbSession` for the request.
///
/// Add this as a handler parameter to get a unit of work that is released
/// when the handler returns, fails or is cancelled. Acquisition failures are
/// rejected with `DATABASE_UNAVAILABLE` before the handler body runs.
impl FromRequestParts<AppState> for DbSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbSession::begin(&state.db).await?)
    }
}

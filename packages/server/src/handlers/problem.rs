use axum::Json;
use sea_orm::*;
use tracing::instrument;

use crate::database::DbSession;
use crate::entity::problem;
use crate::error::{AppError, ErrorBody};
use crate::models::problem::*;

#[utoipa::path(
    get,
    path = "/problems",
    tag = "Problems",
    operation_id = "listProblems",
    summary = "List the most recent problems",
    description = "Returns up to 30 problems ordered by `created_at` descending, ties broken by `id` descending. Takes no parameters.",
    responses(
        (status = 200, description = "Most recent problems", body = ProblemListResponse),
        (status = 500, description = "Query failed (INTERNAL_ERROR)", body = ErrorBody),
        (status = 503, description = "Database unreachable (DATABASE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(session))]
pub async fn list_problems(session: DbSession) -> Result<Json<ProblemListResponse>, AppError> {
    let rows = problem::Entity::find()
        .select_only()
        .column(problem::Column::Id)
        .column(problem::Column::GenreId)
        .column(problem::Column::Text)
        .column(problem::Column::AnswerFilePath)
        .column(problem::Column::CreatedAt)
        .order_by_desc(problem::Column::CreatedAt)
        .order_by_desc(problem::Column::Id)
        .limit(PROBLEM_LIST_LIMIT)
        .into_model::<ProblemRow>()
        .all(&*session)
        .await?;

    session.close().await?;

    let problems: Vec<ProblemSummary> = rows.into_iter().map(ProblemSummary::from).collect();
    tracing::debug!(count = problems.len(), "Listed problems");

    Ok(Json(ProblemListResponse { problems }))
}

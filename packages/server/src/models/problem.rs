use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;

/// Maximum number of problems returned by the listing.
pub const PROBLEM_LIST_LIMIT: u64 = 30;

/// A `problems` row as read by the listing query.
///
/// `created_at` is NOT NULL in the schema; it is still read as optional so a
/// row written outside this service cannot fail the whole response.
#[derive(Debug, FromQueryResult)]
pub struct ProblemRow {
    pub id: i64,
    pub genre_id: i32,
    pub text: String,
    pub answer_file_path: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A problem as it appears in `GET /problems`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemSummary {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = 3)]
    pub genre_id: i32,
    pub text: String,
    #[schema(example = "answers/42.mp3")]
    pub answer_file_path: String,
    /// ISO-8601 timestamp in UTC, or `null` when the row has none.
    #[schema(example = "2024-05-01T09:30:00Z")]
    pub created_at: Option<String>,
}

impl From<ProblemRow> for ProblemSummary {
    fn from(row: ProblemRow) -> Self {
        Self {
            id: row.id,
            genre_id: row.genre_id,
            text: row.text,
            answer_file_path: row.answer_file_path,
            created_at: row.created_at.map(format_timestamp),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemListResponse {
    /// Newest first, at most 30 entries.
    pub problems: Vec<ProblemSummary>,
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

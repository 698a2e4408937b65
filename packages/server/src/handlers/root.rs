use axum::Json;

use crate::models::root::RootResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "root",
    summary = "Liveness message",
    description = "Always returns a fixed greeting. Does not touch the database, so it stays available when storage is down.",
    responses(
        (status = 200, description = "Service is up", body = RootResponse),
    ),
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World",
    })
}

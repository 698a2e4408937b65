use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct RootResponse {
    #[schema(example = "Hello World")]
    pub message: &'static str,
}

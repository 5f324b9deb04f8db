use crate::app::ApiContext;
use crate::routes::avatar::AvatarApi;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const AVATAR_TAG: &str = "Avatar";

pub fn router() -> Router<ApiContext> {
    Router::new().route("/api-docs/openapi.json", get(openapi))
}

#[derive(OpenApi)]
#[openapi(nest(
        (
            path = "/avatar", api = AvatarApi
        )
))]
struct Api;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(Api::openapi())
}

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

use crate::app::{
    avatar::{to_data_uri, AvatarOptions},
    error::{AppError, InputErrorResponse},
    extrator::{ValidatedJson, ValidatedQuery},
    ApiContext,
};

use super::docs::AVATAR_TAG;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(OpenApi)]
#[openapi(paths(get_avatar_svg, get_avatar_data_uri, render_avatar))]
pub struct AvatarApi;

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/avatar", post(render_avatar))
        .route("/avatar/{username}", get(get_avatar_svg))
        .route("/avatar/{username}/data-uri", get(get_avatar_data_uri))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderAvatar {
    #[validate(length(max = 256))]
    pub username: String,
    #[serde(default)]
    #[validate(nested)]
    pub options: AvatarOptions,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataUriResponse {
    pub data_uri: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub svg: String,
    pub data_uri: String,
}

#[utoipa::path(
    get,
    path = "/{username}",
    tag = AVATAR_TAG,
    params(
        ("username" = String, Path, description = "Seed for colors and initials"),
        ("width" = Option<f64>, Query),
        ("height" = Option<f64>, Query),
        ("backgroundColor" = Option<String>, Query, description = "#RRGGBB"),
        ("textColor" = Option<String>, Query, description = "#RRGGBB"),
        ("shape" = Option<String>, Query, description = "square or circle"),
        ("initialsLength" = Option<usize>, Query),
        ("fontFamily" = Option<String>, Query),
        ("fontSize" = Option<String>, Query, description = "Pixels or \"unset\""),
        ("text" = Option<String>, Query, description = "Label instead of initials"),
    ),
    responses(
        (status = 200, description = "SVG avatar", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Malformed query"),
        (status = 422, description = "Invalid options", body = InputErrorResponse)
    )
)]
#[tracing::instrument(name = "Render avatar svg", skip_all, fields(username = %username))]
async fn get_avatar_svg(
    ctx: State<ApiContext>,
    Path(username): Path<String>,
    ValidatedQuery(options): ValidatedQuery<AvatarOptions>,
) -> Result<impl IntoResponse, AppError> {
    let svg = ctx.generator.svg(&username, &options);

    Ok((
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, ctx.config.cache_control()),
        ],
        svg,
    ))
}

#[utoipa::path(
    get,
    path = "/{username}/data-uri",
    tag = AVATAR_TAG,
    params(
        ("username" = String, Path, description = "Seed for colors and initials"),
    ),
    responses(
        (status = 200, description = "Avatar as a data URI", body = DataUriResponse),
        (status = 400, description = "Malformed query"),
        (status = 422, description = "Invalid options", body = InputErrorResponse)
    )
)]
#[tracing::instrument(name = "Render avatar data uri", skip_all, fields(username = %username))]
async fn get_avatar_data_uri(
    ctx: State<ApiContext>,
    Path(username): Path<String>,
    ValidatedQuery(options): ValidatedQuery<AvatarOptions>,
) -> Result<impl IntoResponse, AppError> {
    let data_uri = ctx.generator.data_uri(&username, &options);

    Ok((
        [(header::CACHE_CONTROL, ctx.config.cache_control())],
        Json(DataUriResponse { data_uri }),
    ))
}

#[utoipa::path(
    post,
    path = "",
    tag = AVATAR_TAG,
    request_body = RenderAvatar,
    responses(
        (status = 200, description = "Rendered avatar", body = AvatarResponse),
        (status = 400, description = "Bad request"),
        (status = 422, description = "Invalid input", body = InputErrorResponse)
    )
)]
#[tracing::instrument(name = "Render avatar", skip_all, fields(username = %req.username))]
async fn render_avatar(
    ctx: State<ApiContext>,
    ValidatedJson(req): ValidatedJson<RenderAvatar>,
) -> Result<Json<AvatarResponse>, AppError> {
    let svg = ctx.generator.svg(&req.username, &req.options);
    let data_uri = to_data_uri(&svg);

    Ok(Json(AvatarResponse { svg, data_uri }))
}

use crate::model::space::{CreateSpaceRequest, SpaceResponse, SpacesResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::id::SpaceId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_space(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let space_id = registry.space_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "spaceId": space_id })),
    ))
}

pub async fn show_space_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpacesResponse>> {
    registry
        .space_repository()
        .find_all()
        .await
        .map(SpacesResponse::from)
        .map(Json)
}

pub async fn show_space(
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpaceResponse>> {
    registry
        .space_repository()
        .find_by_id(space_id)
        .await
        .and_then(|space| match space {
            Some(space) => Ok(Json(space.into())),
            None => Err(AppError::SpaceNotFound(space_id.raw())),
        })
}

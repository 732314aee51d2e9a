use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use jukey_api::anilist::types::CharacterResponse;
use jukey_api::anilist::QueryName;
use jukey_api::models::CharacterProfile;
use jukey_api::traits::GraphQLTransport;

use super::positive_id;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/character/{id}`
pub async fn get_character(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CharacterProfile>, ApiError> {
    let Path(id) = id?;
    let id = positive_id(id)?;
    tracing::info!(id, "GET /character");

    let request = state
        .queries
        .request(QueryName::Character, serde_json::json!({ "id": id }));
    let resp: CharacterResponse = state
        .anilist
        .fetch(request)
        .await
        .map_err(ApiError::lookup("character"))?;

    let character = resp.character.ok_or(ApiError::NotFound("character"))?;
    Ok(Json(character.into_profile()))
}

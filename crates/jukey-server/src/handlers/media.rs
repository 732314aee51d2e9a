use std::str::FromStr;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use jukey_api::anilist::types::MediaResponse;
use jukey_api::anilist::QueryName;
use jukey_api::models::MediaDetails;
use jukey_api::traits::GraphQLTransport;

use super::positive_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Media kinds accepted in the route. Light novels live under AniList's MANGA type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Anime,
    Manga,
    Ranobe,
}

impl MediaKind {
    /// AniList `MediaType` the upstream record must carry.
    pub fn anilist_type(self) -> &'static str {
        match self {
            Self::Anime => "ANIME",
            Self::Manga | Self::Ranobe => "MANGA",
        }
    }
}

impl FromStr for MediaKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            "ranobe" => Ok(Self::Ranobe),
            _ => Err(ApiError::BadRequest(format!(
                "invalid media type {s:?} (expected anime, manga or ranobe)"
            ))),
        }
    }
}

/// `GET /api/media/{type}/{id}`
pub async fn get_media(
    State(state): State<AppState>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<Json<MediaDetails>, ApiError> {
    let Path((kind, id)) = path?;
    let kind: MediaKind = kind.parse()?;
    let id = positive_id(id)?;
    tracing::info!(?kind, id, "GET /media");

    let request = state
        .queries
        .request(QueryName::MediaDetails, serde_json::json!({ "id": id }));
    let resp: MediaResponse = state
        .anilist
        .fetch(request)
        .await
        .map_err(ApiError::lookup("media"))?;

    let media = resp.media.ok_or(ApiError::NotFound("media"))?;
    if let Some(actual) = media.media_type.as_deref() {
        if actual != kind.anilist_type() {
            tracing::debug!(id, actual, expected = kind.anilist_type(), "media type mismatch");
            return Err(ApiError::NotFound("media"));
        }
    }

    Ok(Json(media.into_details()))
}

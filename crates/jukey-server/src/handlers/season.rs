use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use jukey_api::anilist::types::MediaPageResponse;
use jukey_api::anilist::QueryName;
use jukey_api::models::MediaSummary;
use jukey_api::traits::{AnimeSeason, GraphQLTransport};
use serde::Deserialize;

use super::{bounded, MAX_PAGE_SIZE};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_SEASON_LIMIT: u32 = 8;

#[derive(Debug, Deserialize)]
pub struct SeasonParams {
    limit: Option<i64>,
}

/// `GET /api/season/current?limit`: most popular anime of the current UTC season.
pub async fn current_season(
    State(state): State<AppState>,
    params: Result<Query<SeasonParams>, QueryRejection>,
) -> Result<Json<Vec<MediaSummary>>, ApiError> {
    let Query(params) = params?;
    let limit = bounded("limit", params.limit, DEFAULT_SEASON_LIMIT, 1, MAX_PAGE_SIZE)?;

    let now = Utc::now();
    let season = AnimeSeason::from_month(now.month());
    let year = now.year();
    tracing::info!(%season, year, limit, "GET /season/current");

    let request = state.queries.request(
        QueryName::CurrentSeason,
        serde_json::json!({
            "season": season.to_anilist_str(),
            "seasonYear": year,
            "page": 1,
            "perPage": limit,
        }),
    );
    let resp: MediaPageResponse = state.anilist.fetch(request).await?;

    let media: Vec<MediaSummary> = resp
        .page
        .map(|page| page.media)
        .unwrap_or_default()
        .into_iter()
        .map(|m| m.into_summary())
        .collect();
    if media.is_empty() {
        tracing::warn!(%season, year, "no media found for current season");
    }
    Ok(Json(media))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::{Datelike, Utc};
    use jukey_api::traits::AnimeSeason;
    use mockito::Matcher;

    use crate::handlers::test_support::{app_for, get};

    #[tokio::test]
    async fn test_current_season_list() {
        let now = Utc::now();
        let season = AnimeSeason::from_month(now.month());

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "variables": {
                    "season": season.to_anilist_str(),
                    "seasonYear": now.year(),
                    "page": 1,
                    "perPage": 3
                }
            })))
            .with_status(200)
            .with_body(
                serde_json::json!({ "data": { "Page": {
                    "pageInfo": { "hasNextPage": true },
                    "media": [
                        { "id": 1, "type": "ANIME", "title": { "romaji": "First" }, "coverImage": { "extraLarge": "https://img/xl.png" } },
                        { "id": 2, "type": "ANIME", "title": { "romaji": "Second" } },
                        null
                    ]
                } } })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let (status, body) = get(app_for(&server), "/api/season/current?limit=3").await;

        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["cover_image_url"], "https://img/xl.png");
        assert_eq!(
            list[1]["cover_image_url"],
            "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx2.png"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_page_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "data": { "Page": null } }"#)
            .create_async()
            .await;

        let (status, body) = get(app_for(&server), "/api/season/current").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_limit_out_of_range_is_400() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let (status, _) = get(app_for(&server), "/api/season/current?limit=100").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        mock.assert_async().await;
    }
}

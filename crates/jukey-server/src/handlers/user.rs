use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use jukey_api::anilist::types::{UserResponse, ViewerResponse};
use jukey_api::anilist::{AniListError, QueryName};
use jukey_api::models::UserProfile;
use jukey_api::traits::GraphQLTransport;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/user/{username}`
pub async fn get_user(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let Path(username) = username?;
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".into()));
    }
    tracing::info!(username, "GET /user");

    let request = state
        .queries
        .request(QueryName::UserProfile, serde_json::json!({ "name": username }));
    let resp: UserResponse = state
        .anilist
        .fetch(request)
        .await
        .map_err(ApiError::lookup("user"))?;

    let user = resp.user.ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into_profile()))
}

/// `GET /api/user/me`: profile of the caller's own AniList account.
pub async fn get_viewer(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, ApiError> {
    let identity = state.identity.resolve_identity(&headers)?;

    let request = state
        .queries
        .request(QueryName::ViewerProfile, serde_json::json!({}))
        .with_bearer_token(&identity.token);
    let resp: ViewerResponse = state.anilist.fetch(request).await.map_err(|err| match err {
        // AniList rejects an unusable token with HTTP 400 or 401.
        AniListError::Api { status: 400 | 401, .. } => ApiError::Unauthorized,
        err => ApiError::from(err),
    })?;

    let viewer = resp.viewer.ok_or(ApiError::Unauthorized)?;
    Ok(Json(viewer.into_profile()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mockito::Matcher;

    use crate::handlers::test_support::{app_for, app_with_token, get, mock_anilist, send};

    fn user_body(root: &str) -> serde_json::Value {
        let mut body = serde_json::json!({ "data": {} });
        body["data"][root] = serde_json::json!({
            "id": 1,
            "name": "Josh",
            "avatar": { "large": null, "medium": null },
            "statistics": { "anime": { "count": 120, "meanScore": 78.5, "minutesWatched": 90000, "episodesWatched": 1500 } },
            "favourites": { "anime": null, "characters": { "nodes": [ { "id": 40, "name": { "full": "Lelouch" } } ] } },
            "createdAt": 1500000000
        });
        body
    }

    #[tokio::test]
    async fn test_user_profile() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({ "variables": { "name": "Josh" } })))
            .with_status(200)
            .with_body(user_body("User").to_string())
            .create_async()
            .await;

        let (status, body) = get(app_for(&server), "/api/user/Josh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Josh");
        assert!(body["avatar"]["url"].as_str().unwrap().starts_with("https://"));
        assert_eq!(body["statistics"]["anime"]["count"], 120);
        assert_eq!(body["favourites"]["anime"], serde_json::json!([]));
        assert_eq!(body["favourites"]["staff"], serde_json::json!([]));
        assert_eq!(body["favourites"]["characters"][0]["name_full"], "Lelouch");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let mut server = mockito::Server::new_async().await;
        let _mock = mock_anilist(&mut server, 200, serde_json::json!({ "data": { "User": null } })).await;

        let (status, body) = get(app_for(&server), "/api/user/nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn test_viewer_requires_identity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let (status, _) = get(app_for(&server), "/api/user/me").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_viewer_forwards_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer user-token")
            .with_status(200)
            .with_body(user_body("Viewer").to_string())
            .expect(1)
            .create_async()
            .await;

        let request = Request::builder()
            .uri("/api/user/me")
            .header("authorization", "Bearer user-token")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_for(&server), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_viewer_uses_static_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer configured")
            .with_status(200)
            .with_body(user_body("Viewer").to_string())
            .create_async()
            .await;

        let (status, _) = get(app_with_token(&server, Some("configured")), "/api/user/me").await;

        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_token_is_401() {
        let mut server = mockito::Server::new_async().await;
        let _mock = mock_anilist(
            &mut server,
            400,
            serde_json::json!({ "errors": [ { "message": "Invalid token", "status": 400 } ], "data": null }),
        )
        .await;

        let (status, _) = get(app_with_token(&server, Some("stale")), "/api/user/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_null_viewer_is_401() {
        let mut server = mockito::Server::new_async().await;
        let _mock = mock_anilist(&mut server, 200, serde_json::json!({ "data": { "Viewer": null } })).await;

        let (status, _) = get(app_with_token(&server, Some("t")), "/api/user/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

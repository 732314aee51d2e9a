use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use super::error::AniListError;
use super::types::{GraphQLErrorDetail, GraphQLResponse};
use crate::traits::{GraphQLRequest, GraphQLTransport};

pub const DEFAULT_API_URL: &str = "https://graphql.anilist.co";
pub const DEFAULT_USER_AGENT: &str = "JukeyAnime/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Longest slice of an error body kept in [`AniListError::Api`].
const ERROR_BODY_LIMIT: usize = 512;

/// AniList GraphQL API client.
#[derive(Debug)]
pub struct AniListClient {
    api_url: String,
    http: Client,
}

impl AniListClient {
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, AniListError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_url: api_url.into(),
            http,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run `query` with `variables` and return the `data` object.
    pub async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, AniListError> {
        self.graphql_request(GraphQLRequest::new("query", query, variables))
            .await
    }

    async fn graphql_request(
        &self,
        request: GraphQLRequest<'_>,
    ) -> Result<serde_json::Value, AniListError> {
        let operation = request.operation;
        tracing::debug!(operation, "AniList GraphQL request");

        let mut builder = self.http.post(&self.api_url).json(&serde_json::json!({
            "query": request.query,
            "variables": request.variables,
        }));
        if let Some(token) = request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "AniList request failed");
            AniListError::from(e)
        })?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND && body_reports_not_found(&body) {
                tracing::debug!(operation, "AniList reported entity not found");
                return Err(AniListError::NotFound);
            }
            tracing::warn!(operation, status = status.as_u16(), "AniList API error");
            return Err(AniListError::Api {
                status: status.as_u16(),
                message: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        tracing::debug!(operation, status = %status, "AniList response received");
        let envelope: GraphQLResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| {
                tracing::warn!(operation, error = %e, "AniList body is not a GraphQL envelope");
                AniListError::Parse(e.to_string())
            })?;

        // Under HTTP 2xx any reported error fails the call, even a 404 marker.
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            tracing::warn!(operation, errors = ?messages, "AniList returned GraphQL errors");
            return Err(AniListError::GraphQL { messages });
        }

        match envelope.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(AniListError::Parse(
                "response carried neither data nor errors".into(),
            )),
        }
    }
}

impl GraphQLTransport for AniListClient {
    async fn execute(
        &self,
        request: GraphQLRequest<'_>,
    ) -> Result<serde_json::Value, AniListError> {
        self.graphql_request(request).await
    }
}

fn all_not_found(errors: &[GraphQLErrorDetail]) -> bool {
    !errors.is_empty() && errors.iter().all(|e| e.status == Some(404))
}

fn body_reports_not_found(body: &str) -> bool {
    serde_json::from_str::<GraphQLResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.errors)
        .is_some_and(|errors| all_not_found(&errors))
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> AniListClient {
        AniListClient::new(server.url(), DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn test_returns_data_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "variables": { "id": 1 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "data": { "Character": { "id": 1 } } }"#)
            .expect(1)
            .create_async()
            .await;

        let data = client_for(&server)
            .query("query ($id: Int) { Character(id: $id) { id } }", serde_json::json!({ "id": 1 }))
            .await
            .unwrap();

        assert_eq!(data, serde_json::json!({ "Character": { "id": 1 } }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_is_forwarded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{ "data": { "Viewer": { "id": 7 } } }"#)
            .create_async()
            .await;

        let request =
            GraphQLRequest::new("viewer", "query { Viewer { id } }", serde_json::json!({}))
                .with_bearer_token("secret");
        let data = client_for(&server).execute(request).await.unwrap();

        assert_eq!(data["Viewer"]["id"], 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_500_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body(r#"{ "data": { "Character": { "id": 1 } } }"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AniListError::Api { status: 500, .. }));
        assert!(err.is_upstream_failure());
    }

    #[tokio::test]
    async fn test_errors_with_data_is_graphql_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                r#"{
                    "data": { "Character": { "id": 1 } },
                    "errors": [ { "message": "Validation error", "status": 400 } ]
                }"#,
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            AniListError::GraphQL { messages } => assert_eq!(messages, ["Validation error"]),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_errors_list_is_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "data": { "Page": null }, "errors": [] }"#)
            .create_async()
            .await;

        let data = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap();
        assert!(data["Page"].is_null());
    }

    #[tokio::test]
    async fn test_not_found_marker_with_404() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(404)
            .with_body(
                r#"{
                    "errors": [ { "message": "Not Found.", "status": 404 } ],
                    "data": { "Character": null }
                }"#,
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::NotFound));
    }

    #[tokio::test]
    async fn test_not_found_marker_under_200_is_graphql_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                r#"{
                    "errors": [ { "message": "Not Found.", "status": 404 } ],
                    "data": { "Character": { "id": 1 } }
                }"#,
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::GraphQL { .. }));
        assert!(err.is_upstream_failure());
    }

    #[tokio::test]
    async fn test_non_object_errors_are_graphql_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "data": null, "errors": ["rate limited"] }"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            AniListError::GraphQL { messages } => assert_eq!(messages, ["rate limited"]),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_404_stays_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(404)
            .with_body("<html>nginx</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::Parse(_)));
        assert!(!err.is_upstream_failure());
    }

    #[tokio::test]
    async fn test_missing_data_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "data": null }"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            count: u32,
        }

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "data": { "count": "many" } }"#)
            .create_async()
            .await;

        let request = GraphQLRequest::new("count", "query { count }", serde_json::json!({}));
        let err = client_for(&server).fetch::<Expected>(request).await.unwrap_err();
        assert!(matches!(err, AniListError::Shape(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client =
            AniListClient::new("http://127.0.0.1:9", DEFAULT_USER_AGENT, Duration::from_secs(2))
                .unwrap();
        let err = client
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AniListError::Http(_) | AniListError::Timeout));
        assert!(err.is_upstream_failure());
    }

    #[tokio::test]
    async fn test_silent_upstream_is_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let silent = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let client = AniListClient::new(
            format!("http://{addr}"),
            DEFAULT_USER_AGENT,
            Duration::from_millis(300),
        )
        .unwrap();
        let err = client
            .query("query { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        silent.abort();

        assert!(matches!(err, AniListError::Timeout));
        assert!(err.is_upstream_failure());
    }

    #[test]
    fn test_truncate_long_body() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jukey_api::anilist::queries::QueryError;
use jukey_api::anilist::AniListError;
use serde::Serialize;
use thiserror::Error;

use crate::auth::Unauthenticated;
use crate::config::ConfigError;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Errors surfaced by request handlers.
///
/// This is the only place upstream failures turn into HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(#[source] AniListError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify an upstream failure while looking up `entity`.
    pub fn lookup(entity: &'static str) -> impl FnOnce(AniListError) -> ApiError {
        move |err| match err {
            AniListError::NotFound => ApiError::NotFound(entity),
            err => ApiError::from(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AniListError> for ApiError {
    fn from(err: AniListError) -> Self {
        match err {
            AniListError::NotFound => Self::NotFound("resource"),
            err if err.is_upstream_failure() => Self::UpstreamUnavailable(err),
            err => Self::Internal(err.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<Unauthenticated> for ApiError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthorized
    }
}

/// Maps each error kind to its status. Upstream and internal details are
/// logged and replaced with a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized | Self::NotFound(_) => self.to_string(),
            Self::UpstreamUnavailable(err) => {
                tracing::warn!(error = %err, "upstream call failed");
                "upstream service unavailable".to_string()
            }
            Self::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "internal server error".to_string()
            }
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Queries(#[from] QueryError),

    #[error("failed to build AniList client: {0}")]
    Client(#[from] AniListError),

    #[error("invalid CORS origin {0:?}")]
    CorsOrigin(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Trait definitions for the upstream GraphQL transport.
//!
//! Handlers and the birthday walker only depend on [`GraphQLTransport`], so the
//! real HTTP client and in-memory fakes are interchangeable.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::anilist::error::AniListError;

/// A single GraphQL call: one query document plus its variables.
#[derive(Debug, Clone)]
pub struct GraphQLRequest<'a> {
    /// Short name used in logs.
    pub operation: &'a str,
    pub query: &'a str,
    pub variables: serde_json::Value,
    /// Sent as `Authorization: Bearer ...` when present.
    pub bearer_token: Option<&'a str>,
}

impl<'a> GraphQLRequest<'a> {
    pub fn new(operation: &'a str, query: &'a str, variables: serde_json::Value) -> Self {
        Self {
            operation,
            query,
            variables,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: &'a str) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

/// Something that can execute a GraphQL request against the upstream.
pub trait GraphQLTransport: Send + Sync {
    /// Execute the request and return the envelope's `data` object.
    ///
    /// Implementations classify every failure into [`AniListError`]; a
    /// response carrying a non-empty `errors` list is a failure even when
    /// `data` is also populated.
    fn execute(
        &self,
        request: GraphQLRequest<'_>,
    ) -> impl Future<Output = Result<serde_json::Value, AniListError>> + Send;

    /// Execute the request and decode `data` into a typed response.
    ///
    /// A `data` object that does not fit `T` is reported as
    /// [`AniListError::Shape`].
    fn fetch<T>(
        &self,
        request: GraphQLRequest<'_>,
    ) -> impl Future<Output = Result<T, AniListError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let operation = request.operation;
            let data = self.execute(request).await?;
            serde_json::from_value(data).map_err(|e| {
                tracing::error!(operation, error = %e, "AniList data has an unexpected shape");
                AniListError::Shape(e.to_string())
            })
        }
    }
}

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl AnimeSeason {
    pub const ALL: &[AnimeSeason] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Convert to AniList GraphQL `MediaSeason` enum value.
    pub fn to_anilist_str(self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
        }
    }

    /// Season containing the given calendar month (1-12).
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl std::fmt::Display for AnimeSeason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

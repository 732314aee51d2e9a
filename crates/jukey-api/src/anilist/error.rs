use thiserror::Error;

/// Errors from the AniList GraphQL client.
#[derive(Debug, Error)]
pub enum AniListError {
    #[error("request to AniList timed out")]
    Timeout,

    /// Connection, DNS or TLS failure.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Non-2xx status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx status but the envelope carries an `errors` list.
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQL { messages: Vec<String> },

    /// Every reported error was AniList's 404 marker.
    #[error("entity not found on AniList")]
    NotFound,

    /// Body is not a GraphQL envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// `data` decoded but does not have the shape the caller expected.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl AniListError {
    /// Whether the failure lies with the upstream service rather than with us.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Http(_) | Self::Api { .. } | Self::GraphQL { .. }
        )
    }
}

impl From<reqwest::Error> for AniListError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e)
        }
    }
}

//! Caller identity for endpoints that act on behalf of a user.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use thiserror::Error;

/// An authenticated caller, identified by the AniList access token to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
}

#[derive(Debug, Error)]
#[error("missing or invalid bearer token")]
pub struct Unauthenticated;

/// Resolves the caller of a request.
pub trait IdentityResolver: Send + Sync {
    fn resolve_identity(&self, headers: &HeaderMap) -> Result<Identity, Unauthenticated>;
}

/// Accepts any `Authorization: Bearer` token as-is, falling back to a token
/// from configuration when the request carries none. Real validation happens
/// upstream when the token is used.
#[derive(Debug, Clone, Default)]
pub struct StubIdentityResolver {
    static_token: Option<String>,
}

impl StubIdentityResolver {
    pub fn new(static_token: Option<String>) -> Self {
        Self { static_token }
    }
}

impl IdentityResolver for StubIdentityResolver {
    fn resolve_identity(&self, headers: &HeaderMap) -> Result<Identity, Unauthenticated> {
        if let Some(value) = headers.get(AUTHORIZATION) {
            // A malformed header never falls back to the static token.
            let token = value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(Unauthenticated)?;
            return Ok(Identity {
                token: token.to_string(),
            });
        }

        self.static_token
            .clone()
            .map(|token| Identity { token })
            .ok_or(Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_bearer_header_wins() {
        let resolver = StubIdentityResolver::new(Some("static".into()));
        let identity = resolver.resolve_identity(&headers_with("Bearer abc")).unwrap();
        assert_eq!(identity.token, "abc");
    }

    #[test]
    fn test_static_token_fallback() {
        let resolver = StubIdentityResolver::new(Some("static".into()));
        let identity = resolver.resolve_identity(&HeaderMap::new()).unwrap();
        assert_eq!(identity.token, "static");
    }

    #[test]
    fn test_no_token_is_unauthenticated() {
        let resolver = StubIdentityResolver::default();
        assert!(resolver.resolve_identity(&HeaderMap::new()).is_err());
    }

    #[test]
    fn test_malformed_header_rejected() {
        let resolver = StubIdentityResolver::new(Some("static".into()));
        assert!(resolver.resolve_identity(&headers_with("Basic abc")).is_err());
        assert!(resolver.resolve_identity(&headers_with("Bearer   ")).is_err());
    }
}

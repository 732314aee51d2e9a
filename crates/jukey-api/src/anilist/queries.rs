//! Named GraphQL documents.
//!
//! The registry is built once at startup, either from the copies compiled into
//! the binary or from a directory of `<name>.gql` files, and is read-only
//! afterwards.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::traits::GraphQLRequest;

/// Every query the backend issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    Character,
    Staff,
    MediaDetails,
    UserProfile,
    ViewerProfile,
    TodayBirthdays,
    CurrentSeason,
}

impl QueryName {
    pub const ALL: &[QueryName] = &[
        Self::Character,
        Self::Staff,
        Self::MediaDetails,
        Self::UserProfile,
        Self::ViewerProfile,
        Self::TodayBirthdays,
        Self::CurrentSeason,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Staff => "staff",
            Self::MediaDetails => "media_details",
            Self::UserProfile => "user_profile",
            Self::ViewerProfile => "viewer_profile",
            Self::TodayBirthdays => "today_birthdays",
            Self::CurrentSeason => "current_season",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.gql", self.as_str())
    }

    fn builtin_text(self) -> &'static str {
        match self {
            Self::Character => include_str!("../../queries/character.gql"),
            Self::Staff => include_str!("../../queries/staff.gql"),
            Self::MediaDetails => include_str!("../../queries/media_details.gql"),
            Self::UserProfile => include_str!("../../queries/user_profile.gql"),
            Self::ViewerProfile => include_str!("../../queries/viewer_profile.gql"),
            Self::TodayBirthdays => include_str!("../../queries/today_birthdays.gql"),
            Self::CurrentSeason => include_str!("../../queries/current_season.gql"),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for QueryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("GraphQL query file not found: {}", .path.display())]
    Missing { name: QueryName, path: PathBuf },

    #[error("failed to read GraphQL query {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GraphQL query {0} is empty")]
    Empty(QueryName),
}

/// Immutable name → query text map.
#[derive(Debug, Clone)]
pub struct QueryRegistry {
    // Indexed by `QueryName::index`; always holds one entry per name.
    texts: Vec<String>,
}

impl QueryRegistry {
    /// Registry backed by the documents compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            texts: QueryName::ALL
                .iter()
                .map(|name| name.builtin_text().to_string())
                .collect(),
        }
    }

    /// Load every query from `<dir>/<name>.gql`.
    ///
    /// Fails on the first missing, unreadable or blank file.
    pub fn from_dir(dir: &Path) -> Result<Self, QueryError> {
        let mut texts = Vec::with_capacity(QueryName::ALL.len());
        for &name in QueryName::ALL {
            let path = dir.join(name.file_name());
            if !path.exists() {
                return Err(QueryError::Missing { name, path });
            }
            let text = std::fs::read_to_string(&path)
                .map_err(|source| QueryError::Io { path: path.clone(), source })?;
            if text.trim().is_empty() {
                return Err(QueryError::Empty(name));
            }
            tracing::debug!(query = %name, path = %path.display(), "loaded GraphQL query");
            texts.push(text);
        }
        Ok(Self { texts })
    }

    pub fn get(&self, name: QueryName) -> &str {
        &self.texts[name.index()]
    }

    /// Build a request for `name` with the given variables.
    pub fn request(&self, name: QueryName, variables: serde_json::Value) -> GraphQLRequest<'_> {
        GraphQLRequest::new(name.as_str(), self.get(name), variables)
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_query() {
        let registry = QueryRegistry::builtin();
        for &name in QueryName::ALL {
            assert!(
                registry.get(name).contains("query"),
                "{name} should hold a query document"
            );
        }
        assert!(registry.get(QueryName::Character).contains("Character(id: $id)"));
        assert!(registry.get(QueryName::ViewerProfile).contains("Viewer"));
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, &name) in QueryName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }

    #[test]
    fn test_from_dir_loads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        for &name in QueryName::ALL {
            std::fs::write(
                dir.path().join(name.file_name()),
                format!("query {{ # {name}\n}}"),
            )
            .unwrap();
        }

        let registry = QueryRegistry::from_dir(dir.path()).unwrap();
        assert_eq!(registry.get(QueryName::Staff), "query { # staff\n}");

        let request = registry.request(QueryName::Staff, serde_json::json!({ "id": 1 }));
        assert_eq!(request.operation, "staff");
        assert_eq!(request.variables["id"], 1);
    }

    #[test]
    fn test_from_dir_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("character.gql"), "query { x }").unwrap();

        let err = QueryRegistry::from_dir(dir.path()).unwrap_err();
        match err {
            QueryError::Missing { name, .. } => assert_eq!(name, QueryName::Staff),
            other => panic!("expected missing query, got {other:?}"),
        }
    }

    #[test]
    fn test_from_dir_rejects_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        for &name in QueryName::ALL {
            std::fs::write(dir.path().join(name.file_name()), "  \n").unwrap();
        }
        assert!(matches!(
            QueryRegistry::from_dir(dir.path()),
            Err(QueryError::Empty(QueryName::Character))
        ));
    }
}

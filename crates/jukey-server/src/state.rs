use std::sync::Arc;

use jukey_api::anilist::{AniListClient, BirthdayWalker, QueryRegistry};

use crate::auth::{IdentityResolver, StubIdentityResolver};
use crate::config::AppConfig;
use crate::error::StartupError;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub anilist: Arc<AniListClient>,
    pub queries: Arc<QueryRegistry>,
    pub identity: Arc<dyn IdentityResolver>,
    pub birthdays: BirthdayWalker,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let anilist = AniListClient::new(
            config.upstream.api_url.clone(),
            &config.upstream.user_agent,
            config.upstream.timeout(),
        )?;

        let queries = match &config.queries.directory {
            Some(dir) => {
                tracing::info!(directory = %dir.display(), "loading GraphQL queries from disk");
                QueryRegistry::from_dir(dir)?
            }
            None => QueryRegistry::builtin(),
        };

        let identity = StubIdentityResolver::new(config.static_token().map(str::to_string));

        Ok(Self {
            anilist: Arc::new(anilist),
            queries: Arc::new(queries),
            identity: Arc::new(identity),
            birthdays: BirthdayWalker::default(),
        })
    }
}

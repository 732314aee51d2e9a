//! "Birthdays today" page walker.
//!
//! AniList cannot filter characters by day of month, so the walker scans the
//! most-favourited characters page by page and keeps the ones born today.

use chrono::{Datelike, NaiveDate};

use super::error::AniListError;
use super::queries::QueryName;
use super::types::CharacterPageResponse;
use crate::models::BirthdayEntry;
use crate::traits::{GraphQLRequest, GraphQLTransport};

/// Largest `perPage` AniList accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Pages scanned before giving up.
pub const DEFAULT_PAGE_BUDGET: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWalker {
    page_size: u32,
    max_pages: u32,
}

impl Default for BirthdayWalker {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            max_pages: DEFAULT_PAGE_BUDGET,
        }
    }
}

impl BirthdayWalker {
    /// `page_size` is capped at [`MAX_PAGE_SIZE`].
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            max_pages,
        }
    }

    /// Collect up to `wanted` characters born on `today`'s month and day.
    ///
    /// Results keep upstream order (favourites descending). Stops early on an
    /// empty page or when upstream says there is no next page; fewer than
    /// `wanted` results is not an error.
    pub async fn collect<T: GraphQLTransport>(
        &self,
        transport: &T,
        query: &str,
        today: NaiveDate,
        wanted: usize,
    ) -> Result<Vec<BirthdayEntry>, AniListError> {
        let (month, day) = (today.month(), today.day());
        let mut found = Vec::with_capacity(wanted);
        let mut page = 1;

        while page <= self.max_pages && found.len() < wanted {
            let variables = serde_json::json!({
                "page": page,
                "perPage": self.page_size,
                "sort": ["FAVOURITES_DESC"],
            });
            let request =
                GraphQLRequest::new(QueryName::TodayBirthdays.as_str(), query, variables);
            let resp: CharacterPageResponse = transport.fetch(request).await?;

            let Some(page_data) = resp.page else { break };
            tracing::debug!(page, characters = page_data.characters.len(), "birthday page fetched");
            if page_data.characters.is_empty() {
                break;
            }

            for character in page_data.characters {
                if found.len() >= wanted {
                    break;
                }
                if character.has_birthday_on(month, day) {
                    found.push(character.into_birthday_entry());
                }
            }

            // Only an explicit `false` ends the walk; the page budget bounds it otherwise.
            let has_next = page_data.page_info.and_then(|info| info.has_next_page);
            if has_next == Some(false) {
                break;
            }
            page += 1;
        }

        tracing::info!(%today, found = found.len(), pages = page.min(self.max_pages), "birthday scan finished");
        Ok(found)
    }
}

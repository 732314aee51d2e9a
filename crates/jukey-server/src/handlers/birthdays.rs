use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use jukey_api::anilist::QueryName;
use jukey_api::models::BirthdayEntry;
use serde::Deserialize;

use super::{bounded, MAX_PAGE_SIZE};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_BIRTHDAYS: u32 = 8;

#[derive(Debug, Deserialize)]
pub struct BirthdayParams {
    per_page: Option<i64>,
}

/// `GET /api/characters/today-birthdays?per_page`
///
/// "Today" is the server's local date.
pub async fn today_birthdays(
    State(state): State<AppState>,
    params: Result<Query<BirthdayParams>, QueryRejection>,
) -> Result<Json<Vec<BirthdayEntry>>, ApiError> {
    let Query(params) = params?;
    let wanted = bounded("per_page", params.per_page, DEFAULT_BIRTHDAYS, 1, MAX_PAGE_SIZE)?;
    let today = chrono::Local::now().date_naive();
    tracing::info!(%today, wanted, "GET /characters/today-birthdays");

    let entries = state
        .birthdays
        .collect(
            state.anilist.as_ref(),
            state.queries.get(QueryName::TodayBirthdays),
            today,
            wanted as usize,
        )
        .await?;

    Ok(Json(entries))
}

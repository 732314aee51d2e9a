use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use jukey_api::anilist::types::StaffResponse;
use jukey_api::anilist::QueryName;
use jukey_api::models::StaffProfile;
use jukey_api::traits::GraphQLTransport;
use serde::Deserialize;

use super::{bounded, positive_id, MAX_PAGE_SIZE};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_WORKS_PER_PAGE: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct StaffParams {
    page: Option<i64>,
    limit: Option<i64>,
}

/// `GET /api/staff/{id}?page&limit`
pub async fn get_staff(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    params: Result<Query<StaffParams>, QueryRejection>,
) -> Result<Json<StaffProfile>, ApiError> {
    let Path(id) = id?;
    let Query(params) = params?;
    let id = positive_id(id)?;
    let page = bounded("page", params.page, 1, 1, i64::from(u32::MAX))?;
    let limit = bounded("limit", params.limit, DEFAULT_WORKS_PER_PAGE, 1, MAX_PAGE_SIZE)?;
    tracing::info!(id, page, limit, "GET /staff");

    let request = state.queries.request(
        QueryName::Staff,
        serde_json::json!({ "id": id, "page": page, "perPage": limit }),
    );
    let resp: StaffResponse = state
        .anilist
        .fetch(request)
        .await
        .map_err(ApiError::lookup("staff"))?;

    let staff = resp.staff.ok_or(ApiError::NotFound("staff"))?;
    Ok(Json(staff.into_profile()))
}

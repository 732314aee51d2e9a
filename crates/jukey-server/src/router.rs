use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ErrorDto, StartupError};
use crate::handlers::{birthdays, character, health, media, season, staff, user};
use crate::state::AppState;

/// Build the application router.
///
/// Frontend routes live under `/api`; `/` and `/health` sit at the root.
pub fn build(state: AppState, cors_origins: &[String]) -> Result<Router, StartupError> {
    let api = Router::new()
        .route("/character/{id}", get(character::get_character))
        .route("/staff/{id}", get(staff::get_staff))
        .route("/media/{media_type}/{id}", get(media::get_media))
        .route("/user/me", get(user::get_viewer))
        .route("/user/{username}", get(user::get_user))
        .route("/characters/today-birthdays", get(birthdays::today_birthdays))
        .route("/season/current", get(season::current_season));

    let router = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins)?)
        .with_state(state);

    Ok(router)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, StartupError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| StartupError::CorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto {
            error: "route not found".to_string(),
        }),
    )
}

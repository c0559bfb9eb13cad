// HTTP surface: application state, router construction, and the API error
// type. Endpoint handlers live in `routes`.

pub mod routes;

use crate::config::Config;
use crate::players::Aggregator;
use crate::store::{FavoritesStore, PickStore, TeamStore};
use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Shared state injected into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub picks: PickStore,
    pub teams: TeamStore,
    pub favorites: FavoritesStore,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            picks: PickStore::new(),
            teams: TeamStore::with_sample_teams(),
            favorites: FavoritesStore::new(),
        }
    }
}

/// Errors surfaced to API callers. Everything upstream-related is absorbed
/// before it reaches this type; the only client-visible failure is a
/// missing resource.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Build the application router with all endpoints and CORS configured.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    for origin in &config.cors_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => cors = cors.allow_origin(value),
            Err(_) => warn!("ignoring invalid CORS origin {origin:?}"),
        }
    }

    Router::new()
        .route("/", get(routes::root))
        .route("/players", get(routes::get_players))
        .route("/adp/:season", get(routes::get_adp))
        .route(
            "/drafts/:draft_id/picks",
            get(routes::get_picks)
                .put(routes::upsert_picks)
                .delete(routes::clear_picks),
        )
        .route("/teams", get(routes::list_teams).post(routes::create_team))
        .route(
            "/teams/active",
            get(routes::get_active_team).post(routes::set_active_team),
        )
        .route("/teams/:team_id", put(routes::update_team))
        .route(
            "/favorites",
            get(routes::get_favorites).put(routes::put_favorites),
        )
        .layer(cors)
        .with_state(state)
}

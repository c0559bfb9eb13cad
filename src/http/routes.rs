// Endpoint handlers.
//
// The players/ADP endpoints delegate to the aggregator; the pick/team/
// favorites endpoints are thin wrappers over the in-memory stores. None of
// them can fail except the explicit not-found cases.

use crate::http::{ApiError, AppState};
use crate::players::record::{AdpEntry, PlayerRecord, PositionFilter};
use crate::store::{Pick, PickList, Team};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// Liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Draftroom backend is running" }))
}

// ---------------------------------------------------------------------------
// Players & ADP
// ---------------------------------------------------------------------------

fn default_position() -> String {
    "ALL".to_string()
}

fn default_on_team_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    #[serde(default = "default_position")]
    pub position: String,
    /// Draft season; defaults to the current year. Prior-season stats are
    /// shown alongside this season's ADP.
    pub season: Option<i32>,
    #[serde(default = "default_on_team_only")]
    pub on_team_only: bool,
}

pub async fn get_players(
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Json<Vec<PlayerRecord>> {
    let season = query.season.unwrap_or_else(|| Utc::now().year());
    let filter = PositionFilter::parse(&query.position);

    let players = state
        .aggregator
        .players(filter, season, query.on_team_only)
        .await;

    info!(
        "returning {} players for position {} season {season}",
        players.len(),
        query.position
    );
    Json(players)
}

pub async fn get_adp(
    State(state): State<AppState>,
    Path(season): Path<i32>,
) -> Json<Vec<AdpEntry>> {
    Json(state.aggregator.adp(season).await)
}

// ---------------------------------------------------------------------------
// Draft picks
// ---------------------------------------------------------------------------

pub async fn get_picks(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> Json<Vec<Pick>> {
    let list = state.picks.get(&draft_id).await.unwrap_or_default();
    Json(list.picks)
}

/// Idempotent full replace of a draftboard's pick list.
pub async fn upsert_picks(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Json(picks): Json<Vec<Pick>>,
) -> Json<Vec<Pick>> {
    state
        .picks
        .put(
            draft_id,
            PickList {
                picks: picks.clone(),
                updated: Utc::now().timestamp_millis() as f64 / 1000.0,
            },
        )
        .await;
    Json(picks)
}

pub async fn clear_picks(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> Json<Value> {
    state
        .picks
        .put(
            draft_id,
            PickList {
                picks: Vec::new(),
                updated: Utc::now().timestamp_millis() as f64 / 1000.0,
            },
        )
        .await;
    Json(json!({ "ok": true }))
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TeamPayload {
    pub name: String,
    #[serde(default)]
    pub picks: Option<Vec<Value>>,
}

pub async fn list_teams(State(state): State<AppState>) -> Json<Vec<Team>> {
    Json(state.teams.list().await)
}

pub async fn get_active_team(State(state): State<AppState>) -> Json<Option<Team>> {
    Json(state.teams.active().await)
}

pub async fn create_team(
    State(state): State<AppState>,
    Json(payload): Json<TeamPayload>,
) -> Json<Team> {
    Json(state.teams.create(payload.name, payload.picks).await)
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<Value>, ApiError> {
    match state
        .teams
        .update(&team_id, payload.name, payload.picks)
        .await
    {
        Some(team) => Ok(Json(json!({ "ok": true, "team": team }))),
        None => Err(ApiError::NotFound("team")),
    }
}

#[derive(Debug, Deserialize)]
pub struct ActiveTeamQuery {
    pub team_id: String,
}

pub async fn set_active_team(
    State(state): State<AppState>,
    Query(query): Query<ActiveTeamQuery>,
) -> Result<Json<Value>, ApiError> {
    if state.teams.set_active(&query.team_id).await {
        Ok(Json(json!({ "ok": true })))
    } else {
        Err(ApiError::NotFound("team"))
    }
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FavoritesPayload {
    #[serde(default)]
    pub player_ids: Vec<String>,
}

pub async fn get_favorites(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "player_ids": state.favorites.get().await }))
}

pub async fn put_favorites(
    State(state): State<AppState>,
    Json(payload): Json<FavoritesPayload>,
) -> Json<Value> {
    let player_ids = state.favorites.put(payload.player_ids).await;
    Json(json!({ "ok": true, "player_ids": player_ids }))
}

// In-memory CRUD stores for draft picks, teams, and favorites.
//
// Each store is an explicit handle injected into request handlers rather
// than process-wide mutable state. Semantics are intentionally simple:
// last write wins, nothing is persisted across restarts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Generic key-value store
// ---------------------------------------------------------------------------

/// A clonable handle to a string-keyed in-memory map.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    inner: Arc<RwLock<HashMap<String, T>>>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn put(&self, key: String, value: T) {
        self.inner.write().await.insert(key, value);
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.remove(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Draft picks
// ---------------------------------------------------------------------------

/// One draft pick as supplied by the client. The server treats picks as
/// opaque apart from schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub id: String,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub round: u32,
    pub overall: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    pub timestamp: f64,
}

/// The pick list for one draftboard, with the time of the last full replace.
#[derive(Debug, Clone, Default)]
pub struct PickList {
    pub picks: Vec<Pick>,
    pub updated: f64,
}

/// Pick lists keyed by draft id.
pub type PickStore = MemoryStore<PickList>;

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picks: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default)]
struct TeamsState {
    list: Vec<Team>,
    active_id: Option<String>,
}

/// Team list plus the currently-active team id.
#[derive(Debug, Clone, Default)]
pub struct TeamStore {
    inner: Arc<RwLock<TeamsState>>,
}

impl TeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with two sample teams, the first one active.
    pub fn with_sample_teams() -> Self {
        let state = TeamsState {
            list: vec![
                Team {
                    id: "team-1".into(),
                    name: "My League 1".into(),
                    picks: None,
                },
                Team {
                    id: "team-2".into(),
                    name: "Dynasty Squad".into(),
                    picks: None,
                },
            ],
            active_id: Some("team-1".into()),
        };
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn list(&self) -> Vec<Team> {
        self.inner.read().await.list.clone()
    }

    pub async fn active(&self) -> Option<Team> {
        let state = self.inner.read().await;
        let active_id = state.active_id.as_deref()?;
        state.list.iter().find(|t| t.id == active_id).cloned()
    }

    /// Create a team with a fresh id. When no team is active yet, the new
    /// team becomes active.
    pub async fn create(&self, name: String, picks: Option<Vec<serde_json::Value>>) -> Team {
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name,
            picks: Some(picks.unwrap_or_default()),
        };
        let mut state = self.inner.write().await;
        state.list.push(team.clone());
        if state.active_id.is_none() {
            state.active_id = Some(team.id.clone());
        }
        team
    }

    /// Full-replace an existing team. Returns the stored team, or `None`
    /// when the id is unknown.
    pub async fn update(
        &self,
        team_id: &str,
        name: String,
        picks: Option<Vec<serde_json::Value>>,
    ) -> Option<Team> {
        let mut state = self.inner.write().await;
        let slot = state.list.iter_mut().find(|t| t.id == team_id)?;
        *slot = Team {
            id: team_id.to_string(),
            name,
            picks: Some(picks.unwrap_or_default()),
        };
        Some(slot.clone())
    }

    /// Mark an existing team active. Returns false when the id is unknown.
    pub async fn set_active(&self, team_id: &str) -> bool {
        let mut state = self.inner.write().await;
        if state.list.iter().any(|t| t.id == team_id) {
            state.active_id = Some(team_id.to_string());
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// A single global list of favorited player ids.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    inner: Arc<RwLock<Vec<String>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Vec<String> {
        self.inner.read().await.clone()
    }

    pub async fn put(&self, player_ids: Vec<String>) -> Vec<String> {
        let mut favorites = self.inner.write().await;
        *favorites = player_ids;
        favorites.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

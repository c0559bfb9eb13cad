// Upstream provider endpoints and tolerant response parsing.
//
// Two providers feed the aggregator: an id-keyed API (roster, season stats,
// primary ADP) and a name-keyed ADP fallback. Both are treated as opaque JSON
// sources; every parser here accepts the shapes the providers have actually
// been observed to return and silently drops rows it cannot use.

use crate::config::ProviderConfig;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

// ---------------------------------------------------------------------------
// Endpoint URLs
// ---------------------------------------------------------------------------

impl ProviderConfig {
    /// Full player roster/metadata feed, keyed by player id.
    pub fn roster_url(&self) -> String {
        format!("{}/players/nfl", self.sleeper_base_url)
    }

    /// Regular-season counting stats for the given year.
    pub fn stats_url(&self, year: i32) -> String {
        format!("{}/stats/nfl/regular/{year}", self.sleeper_base_url)
    }

    /// PPR ADP for the given draft year, keyed by player id.
    pub fn adp_url(&self, year: i32) -> String {
        format!("{}/adp/nfl/{year}?type=ppr", self.sleeper_base_url)
    }

    /// Name-keyed PPR ADP fallback for the given draft year.
    pub fn ffc_adp_url(&self, year: i32) -> String {
        format!("{}/adp/ppr?teams=12&year={year}", self.ffc_base_url)
    }
}

// ---------------------------------------------------------------------------
// Roster feed
// ---------------------------------------------------------------------------

/// One entry from the roster/metadata feed. Unknown fields are ignored;
/// every field we read is optional because the feed mixes active players,
/// retirees, and team defenses with different field sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl RosterEntry {
    /// Display name as "first last", trimmed (either part may be empty).
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Team code with surrounding whitespace removed; empty when the player
    /// is not on a roster.
    pub fn team_code(&self) -> String {
        self.team.as_deref().unwrap_or("").trim().to_string()
    }
}

/// Parse the roster feed (a JSON object keyed by player id) into a map.
/// Entries that fail to deserialize are dropped with a warning.
pub fn parse_roster(value: &Value) -> HashMap<String, RosterEntry> {
    let Some(object) = value.as_object() else {
        return HashMap::new();
    };

    let mut roster = HashMap::with_capacity(object.len());
    for (player_id, entry) in object {
        match serde_json::from_value::<RosterEntry>(entry.clone()) {
            Ok(parsed) => {
                roster.insert(player_id.clone(), parsed);
            }
            Err(e) => {
                warn!("skipping malformed roster entry {player_id}: {e}");
            }
        }
    }
    roster
}

// ---------------------------------------------------------------------------
// Stats feed
// ---------------------------------------------------------------------------

/// Normalize the stats feed to a map of player id -> raw stat row.
///
/// The feed is either an object keyed by player id, or a list of rows each
/// carrying a `player_id` field. Anything else yields an empty map.
pub fn parse_stats(value: &Value) -> HashMap<String, Value> {
    match value {
        Value::Object(object) => object
            .iter()
            .map(|(player_id, row)| (player_id.clone(), row.clone()))
            .collect(),
        Value::Array(rows) => rows
            .iter()
            .filter_map(|row| {
                let player_id = row.get("player_id")?;
                let key = match player_id {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((key, row.clone()))
            })
            .collect(),
        _ => HashMap::new(),
    }
}

// ---------------------------------------------------------------------------
// ADP feeds
// ---------------------------------------------------------------------------

/// Parse the primary ADP feed: a list of `{player_id, adp}` rows. Only rows
/// with a numeric `adp` are kept; values are rounded to one decimal.
pub fn parse_adp_by_id(value: &Value) -> HashMap<String, f64> {
    let Some(rows) = value.as_array() else {
        return HashMap::new();
    };

    let mut adp = HashMap::new();
    for row in rows {
        let Some(player_id) = row.get("player_id") else {
            continue;
        };
        let key = match player_id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        if let Some(adp_val) = row.get("adp").and_then(Value::as_f64) {
            adp.insert(key, round1(adp_val));
        }
    }
    adp
}

/// Unwrap the fallback provider's response: either a bare list of player
/// rows or an object with a `players` list.
fn ffc_rows(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(rows) => Some(rows),
        Value::Object(object) => object.get("players").and_then(Value::as_array),
        _ => None,
    }
}

/// Parse the name-keyed ADP fallback into a lowercased-name -> ADP map.
pub fn parse_adp_by_name(value: &Value) -> HashMap<String, f64> {
    let Some(rows) = ffc_rows(value) else {
        return HashMap::new();
    };

    let mut adp = HashMap::new();
    for row in rows {
        let Some(name) = row.get("name").and_then(Value::as_str) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if let Some(adp_val) = row.get("adp").and_then(Value::as_f64) {
            adp.insert(name.to_lowercase(), round1(adp_val));
        }
    }
    adp
}

/// Parse the name-keyed fallback into full standalone ADP rows (used by the
/// `/adp/{season}` endpoint when the primary provider has no data). The
/// fallback carries no player ids, so `player_id` is left empty.
pub fn parse_ffc_entries(value: &Value) -> Vec<crate::players::record::AdpEntry> {
    let Some(rows) = ffc_rows(value) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let name = row.get("name").and_then(Value::as_str)?;
            if name.is_empty() {
                return None;
            }
            let adp_val = row.get("adp").and_then(Value::as_f64)?;
            Some(crate::players::record::AdpEntry {
                player_id: String::new(),
                adp: round1(adp_val),
                position: row
                    .get("position")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                team: row
                    .get("team")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Round to one fractional digit (the precision ADP is reported at).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

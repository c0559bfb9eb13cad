// The player data aggregator: fetch, normalize, merge, cache, filter.
//
// For a requested draft season the aggregator shows the prior season's
// production (stats year = season - 1) next to the current season's draft
// value (ADP year = season). Every upstream fetch is independently tolerant
// of failure; the pipeline always produces a usable list.

use crate::config::ProviderConfig;
use crate::fetch::{fetch_or_none, JsonFetcher};
use crate::players::cache::PlayerCache;
use crate::players::coerce::{first_alternative, first_nonzero_alternative, stat_u32};
use crate::players::record::{AdpEntry, PlayerRecord, Position, PositionFilter};
use crate::players::sample;
use crate::players::scoring::{fantasy_points, ScoringInput};
use crate::providers::{
    self, parse_adp_by_id, parse_adp_by_name, parse_ffc_entries, parse_roster, parse_stats,
    RosterEntry,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// Alternative field names for stats whose key varies across feed seasons.
const PASS_ATT_KEYS: &[&str] = &[
    "pass_att",
    "att",
    "attempts",
    "passing.att",
    "passing.attempts",
    "pass.att",
];
const PASS_CMP_KEYS: &[&str] = &[
    "pass_cmp",
    "cmp",
    "completions",
    "passing.cmp",
    "passing.completions",
    "pass.cmp",
];
const TARGETS_KEYS: &[&str] = &["rec_tgt", "targets", "receiving.targets"];
const RUSH_ATT_KEYS: &[&str] = &["rush_att", "rushing_att", "rush_attempts"];

/// The aggregation component: provider endpoints, a shared fetcher, and the
/// per-season cache.
pub struct Aggregator {
    fetcher: Arc<dyn JsonFetcher>,
    providers: ProviderConfig,
    cache: PlayerCache,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, providers: ProviderConfig, ttl: Duration) -> Self {
        Self {
            fetcher,
            providers,
            cache: PlayerCache::new(ttl),
        }
    }

    /// Return the filtered player list for a season, building and caching
    /// the full list on a cache miss. Never fails: with every provider down
    /// the result is built from the offline sample roster.
    pub async fn players(
        &self,
        filter: PositionFilter,
        season: i32,
        on_team_only: bool,
    ) -> Vec<PlayerRecord> {
        let full = match self.cache.get_fresh(season).await {
            Some(cached) => cached,
            None => {
                let built = self.build_season(season, on_team_only).await;
                self.cache.put(season, built.clone()).await;
                built
            }
        };

        match filter {
            PositionFilter::All => full,
            _ => full
                .into_iter()
                .filter(|p| filter.matches(p.position))
                .collect(),
        }
    }

    /// Fetch and merge the full player list for one season (uncached).
    async fn build_season(&self, season: i32, on_team_only: bool) -> Vec<PlayerRecord> {
        let adp_year = season;
        let stats_year = season - 1;

        // Roster feed; non-object responses (or none at all) fall back to
        // the built-in sample so the API stays usable offline.
        let roster_url = self.providers.roster_url();
        info!("fetching roster feed from {roster_url}");
        let roster = match fetch_or_none(self.fetcher.as_ref(), &roster_url).await {
            Some(value) if value.is_object() => parse_roster(&value),
            _ => {
                info!("roster feed unavailable, using built-in sample roster");
                sample::sample_roster()
            }
        };

        // Prior-season stats; absence degrades to zeroed stat lines.
        let stats_url = self.providers.stats_url(stats_year);
        info!("fetching stats feed from {stats_url} for year {stats_year}");
        let stats = fetch_or_none(self.fetcher.as_ref(), &stats_url)
            .await
            .map(|v| parse_stats(&v))
            .unwrap_or_default();

        let (adp_by_id, adp_by_name) = self.fetch_adp_maps(adp_year).await;

        let mut players: Vec<PlayerRecord> = roster
            .iter()
            .filter_map(|(player_id, entry)| {
                merge_player(
                    player_id,
                    entry,
                    stats.get(player_id.as_str()),
                    &adp_by_id,
                    &adp_by_name,
                    on_team_only,
                )
            })
            .collect();

        // The roster map has no inherent order; sort for a stable response.
        players.sort_by(|a, b| a.id.cmp(&b.id));

        info!("built {} player records for season {season}", players.len());
        players
    }

    /// Primary ADP by player id; when it yields nothing, the name-keyed
    /// fallback provider instead.
    async fn fetch_adp_maps(
        &self,
        adp_year: i32,
    ) -> (HashMap<String, f64>, HashMap<String, f64>) {
        let adp_url = self.providers.adp_url(adp_year);
        info!("fetching ADP from {adp_url} for draft year {adp_year}");
        let adp_by_id = fetch_or_none(self.fetcher.as_ref(), &adp_url)
            .await
            .map(|v| parse_adp_by_id(&v))
            .unwrap_or_default();

        if !adp_by_id.is_empty() {
            return (adp_by_id, HashMap::new());
        }

        let ffc_url = self.providers.ffc_adp_url(adp_year);
        info!("primary ADP empty, fetching fallback ADP from {ffc_url}");
        let adp_by_name = fetch_or_none(self.fetcher.as_ref(), &ffc_url)
            .await
            .map(|v| parse_adp_by_name(&v))
            .unwrap_or_default();

        (adp_by_id, adp_by_name)
    }

    /// Standalone ADP rows for a season: primary provider joined with the
    /// roster feed for names, then the name-keyed fallback, then the
    /// built-in sample. Not cached.
    pub async fn adp(&self, season: i32) -> Vec<AdpEntry> {
        let adp_url = self.providers.adp_url(season);
        let rows = fetch_or_none(self.fetcher.as_ref(), &adp_url).await;

        let mut entries = Vec::new();
        if let Some(Value::Array(rows)) = rows {
            if !rows.is_empty() {
                let roster = fetch_or_none(self.fetcher.as_ref(), &self.providers.roster_url())
                    .await
                    .map(|v| parse_roster(&v))
                    .unwrap_or_default();

                for row in &rows {
                    let Some(player_id) = row.get("player_id").and_then(Value::as_str) else {
                        continue;
                    };
                    let Some(adp_val) = row.get("adp").and_then(Value::as_f64) else {
                        continue;
                    };
                    let Some(entry) = roster.get(player_id) else {
                        continue;
                    };
                    let name = entry.full_name();
                    if name.is_empty() {
                        continue;
                    }
                    entries.push(AdpEntry {
                        player_id: player_id.to_string(),
                        adp: providers::round1(adp_val),
                        position: entry.position.clone().unwrap_or_default(),
                        team: entry.team_code(),
                        name,
                    });
                }
            }
        }

        if entries.is_empty() {
            let ffc_url = self.providers.ffc_adp_url(season);
            info!("primary ADP empty for {season}, trying fallback {ffc_url}");
            if let Some(raw) = fetch_or_none(self.fetcher.as_ref(), &ffc_url).await {
                entries = parse_ffc_entries(&raw);
            }
        }

        if entries.is_empty() {
            info!("all ADP providers failed for {season}, serving sample data");
            entries = sample::sample_adp();
        }

        entries
    }
}

/// Normalize one roster entry into a merged player record, or `None` when
/// the entry is filtered out (off-roster, inactive, invalid position).
fn merge_player(
    player_id: &str,
    entry: &RosterEntry,
    stat_row: Option<&Value>,
    adp_by_id: &HashMap<String, f64>,
    adp_by_name: &HashMap<String, f64>,
    on_team_only: bool,
) -> Option<PlayerRecord> {
    let team_code = entry.team_code();
    if on_team_only && team_code.is_empty() {
        return None;
    }
    // Entries explicitly marked inactive are retirees/free agents.
    if on_team_only && entry.active == Some(false) {
        return None;
    }

    let position = Position::from_code(entry.position.as_deref().unwrap_or(""))?;

    let empty_row = Value::Null;
    let stat = stat_row.unwrap_or(&empty_row);

    let pass_yds = stat_u32(stat.get("pass_yd"));
    let pass_td = stat_u32(stat.get("pass_td"));
    let rush_yds = stat_u32(stat.get("rush_yd"));
    let rush_td = stat_u32(stat.get("rush_td"));
    let rec_yds = stat_u32(stat.get("rec_yd"));
    let rec_td = stat_u32(stat.get("rec_td"));
    let receptions = stat_u32(stat.get("rec"));
    let fumbles = stat_u32(stat.get("fum"));
    let interceptions = stat_u32(stat.get("int"));
    let sacks = stat_u32(stat.get("sack"));
    let rush_att = first_nonzero_alternative(stat, RUSH_ATT_KEYS);

    let pass_att = first_alternative(stat, PASS_ATT_KEYS);
    let pass_cmp = first_alternative(stat, PASS_CMP_KEYS);
    let targets = first_alternative(stat, TARGETS_KEYS);

    let fantasy = fantasy_points(ScoringInput {
        pass_yds,
        pass_td,
        interceptions,
        rush_yds,
        rush_td,
        rec_yds,
        rec_td,
        receptions,
    });

    let full_name = entry.full_name();
    let adp = adp_by_id
        .get(player_id)
        .or_else(|| adp_by_name.get(&full_name.to_lowercase()))
        .copied();

    Some(PlayerRecord {
        id: player_id.to_string(),
        name: full_name,
        team: team_code,
        position,
        rank: 0,
        fantasy_points: fantasy,
        rush_yds,
        rush_td,
        rush_att,
        rec_yds,
        rec_td,
        pass_yds,
        pass_td,
        receptions,
        fumbles,
        interceptions,
        sacks,
        adp,
        pass_att,
        pass_cmp,
        targets,
    })
}

// Per-season cache for the normalized player list.
//
// One entry per season, overwritten on refresh. Concurrent misses for the
// same season may each rebuild and overwrite the entry; last writer wins.
// There is no eviction: stale entries age out and are replaced on the next
// miss.

use crate::players::record::PlayerRecord;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheEntry {
    players: Vec<PlayerRecord>,
    captured_at: Instant,
}

/// Season-keyed cache with a fixed freshness window.
pub struct PlayerCache {
    ttl: Duration,
    inner: RwLock<HashMap<i32, CacheEntry>>,
}

impl PlayerCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached list for `season` if it is younger than the TTL.
    pub async fn get_fresh(&self, season: i32) -> Option<Vec<PlayerRecord>> {
        self.get_fresh_at(season, Instant::now()).await
    }

    /// Store the full list for `season`, overwriting any previous entry.
    pub async fn put(&self, season: i32, players: Vec<PlayerRecord>) {
        self.put_at(season, players, Instant::now()).await;
    }

    // Clock-injected variants so tests can control entry age without
    // sleeping.

    pub(crate) async fn get_fresh_at(
        &self,
        season: i32,
        now: Instant,
    ) -> Option<Vec<PlayerRecord>> {
        let cache = self.inner.read().await;
        let entry = cache.get(&season)?;
        if now.duration_since(entry.captured_at) < self.ttl {
            Some(entry.players.clone())
        } else {
            None
        }
    }

    pub(crate) async fn put_at(&self, season: i32, players: Vec<PlayerRecord>, now: Instant) {
        let mut cache = self.inner.write().await;
        cache.insert(
            season,
            CacheEntry {
                players,
                captured_at: now,
            },
        );
    }
}

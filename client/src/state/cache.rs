//! Fetch-freshness ledger: when a list was last fetched and whether a
//! remount may reuse it.
//!
//! DESIGN
//! ======
//! Pages fetch on mount; the ledger stops the refetch churn of quick tab
//! and route switches. Keys are `family:scope` strings and staleness is
//! per family: tag lists change rarely (60s), settings gate chat and are
//! never reused (0), everything else gets 30s. Mutations invalidate by
//! prefix so every scoped list under a family drops together.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;

/// Ledger key for the settings row.
pub const SETTINGS_KEY: &str = "settings";

#[must_use]
pub fn memories_key(org_id: &str) -> String {
    format!("memories:{org_id}")
}

#[must_use]
pub fn tags_key(org_id: &str) -> String {
    format!("tags:{org_id}")
}

/// How long a fetch under this key stays reusable, in milliseconds.
#[must_use]
pub fn stale_time_ms(key: &str) -> f64 {
    let family = key.split(':').next().unwrap_or(key);
    match family {
        "tags" => 60_000.0,
        "settings" => 0.0,
        _ => 30_000.0,
    }
}

/// Last-fetched timestamps, keyed by `family:scope`.
#[derive(Clone, Debug, Default)]
pub struct CacheLedger {
    fetched_at: HashMap<String, f64>,
}

impl CacheLedger {
    /// Record a successful fetch.
    pub fn mark(&mut self, key: &str, now_ms: f64) {
        self.fetched_at.insert(key.to_owned(), now_ms);
    }

    /// Whether a fetch under this key is still reusable.
    #[must_use]
    pub fn is_fresh(&self, key: &str, now_ms: f64) -> bool {
        self.fetched_at
            .get(key)
            .is_some_and(|at| now_ms - at < stale_time_ms(key))
    }

    /// Drop one key.
    pub fn invalidate(&mut self, key: &str) {
        self.fetched_at.remove(key);
    }

    /// Drop every key starting with `prefix`.
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.fetched_at.retain(|key, _| !key.starts_with(prefix));
    }
}

/// Current wall-clock time in milliseconds since the epoch.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}

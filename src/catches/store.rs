//! In-memory catch store with explicit load and flush.

use super::key::{CatchKey, MuteReasonKey};
use crate::models::{CatchRecord, Filter};
use crate::observability::metrics::CATCHES_DROPPED_ON_LOAD;
use crate::storage::PreferenceStore;
use crate::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Default preference key catches are persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "mtd_ame_mute_catches";

/// Map from catch key to catch record.
///
/// The store is owned by the caller and mutated only through
/// [`MuteEngine`](crate::services::MuteEngine) and
/// [`FilterLifecycle`](crate::hooks::FilterLifecycle). It is persisted as an
/// ordered array of `[key, record]` pairs, ascending by key.
///
/// # Thread Safety
///
/// No internal locking: evaluation runs on one logical thread. Wrap the
/// owning engine in a `Mutex` if it must be shared, so that each
/// check-then-write on a key stays atomic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatchStore {
    entries: BTreeMap<CatchKey, CatchRecord>,
}

impl CatchStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Seeds a store from persisted preferences.
    ///
    /// Entries failing the structural check are dropped; a missing or
    /// non-array value yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the preference store itself fails.
    #[instrument(skip(prefs), fields(operation = "catch_store_load"))]
    pub fn load(prefs: &dyn PreferenceStore, storage_key: &str) -> Result<Self> {
        let raw = prefs.get_or(storage_key, Value::Array(Vec::new()))?;
        Ok(Self::from_value(raw))
    }

    /// Builds a store from the persisted `[key, record]` pair array.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let Value::Array(pairs) = raw else {
            warn!("persisted catches are not an array, starting empty");
            return Self::new();
        };

        let total = pairs.len();
        let entries: BTreeMap<_, _> = pairs.into_iter().filter_map(parse_pair).collect();
        let dropped = total - entries.len();
        if dropped > 0 {
            warn!(dropped, "discarded malformed persisted catches");
            metrics::counter!(CATCHES_DROPPED_ON_LOAD)
                .increment(u64::try_from(dropped).unwrap_or(u64::MAX));
        }
        debug!(count = entries.len(), "catch store initialised");

        Self { entries }
    }

    /// Serializes the store into the persisted pair array.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .filter_map(|(key, record)| {
                    serde_json::to_value(record)
                        .ok()
                        .map(|record| Value::Array(vec![Value::String(key.to_string()), record]))
                })
                .collect(),
        )
    }

    /// Writes the store to persisted preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference store rejects the write.
    #[instrument(skip(self, prefs), fields(operation = "catch_store_flush", count = self.len()))]
    pub fn flush(&self, prefs: &mut dyn PreferenceStore, storage_key: &str) -> Result<()> {
        prefs.set(storage_key, self.to_value())
    }

    /// Whether a catch exists under `key`.
    #[must_use]
    pub fn has(&self, key: &CatchKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the catch stored under `key`.
    #[must_use]
    pub fn get(&self, key: &CatchKey) -> Option<&CatchRecord> {
        self.entries.get(key)
    }

    /// Inserts or replaces a catch.
    pub fn set(&mut self, key: CatchKey, record: CatchRecord) {
        self.entries.insert(key, record);
    }

    /// Removes a catch, returning it if present.
    pub fn delete(&mut self, key: &CatchKey) -> Option<CatchRecord> {
        self.entries.remove(key)
    }

    /// Removes every catch, e.g. when settings are imported.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of catches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over catches in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CatchKey, &CatchRecord)> {
        self.entries.iter()
    }

    /// Removes every catch produced by a filter with the same `(kind, value)`.
    ///
    /// Returns the number of removed catches.
    pub fn remove_by_filter(&mut self, filter: &Filter) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, record| !record.is_from(filter));
        before - self.entries.len()
    }

    /// Removes every catch filed under `reason`.
    ///
    /// # Errors
    ///
    /// Returns an error if `reason` cannot be decoded.
    pub fn remove_by_reason(&mut self, reason: &MuteReasonKey) -> Result<usize> {
        let (filter_kind, value) = reason.decode()?;
        let before = self.entries.len();
        self.entries
            .retain(|_, record| record.filter_kind != filter_kind || record.value != value);
        Ok(before - self.entries.len())
    }

    /// Groups catches by the rule that produced them.
    #[must_use]
    pub fn by_reason(&self) -> BTreeMap<MuteReasonKey, Vec<&CatchRecord>> {
        let mut groups: BTreeMap<MuteReasonKey, Vec<&CatchRecord>> = BTreeMap::new();
        for record in self.entries.values() {
            groups
                .entry(MuteReasonKey::encode(record.filter_kind, &record.value))
                .or_default()
                .push(record);
        }
        groups
    }
}

/// Structural check for one persisted pair.
fn parse_pair(pair: Value) -> Option<(CatchKey, CatchRecord)> {
    let Value::Array(mut parts) = pair else {
        return None;
    };
    if parts.len() != 2 {
        return None;
    }
    let record: CatchRecord = serde_json::from_value(parts.pop()?).ok()?;
    let Value::String(raw_key) = parts.pop()? else {
        return None;
    };

    if !record.filter_kind.is_loggable() {
        return None;
    }
    let key = CatchKey::encode(&record);
    (key.as_str() == raw_key).then_some((key, record))
}

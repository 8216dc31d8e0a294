//! Filter add/remove lifecycle.

use crate::catches::{CatchStore, MuteReasonKey};
use crate::models::{Filter, FilterId, FilterKind};
use crate::observability::metrics::CATCHES_PURGED;
use tracing::{debug, info, instrument, warn};

/// The host's filter list.
///
/// [`FilterLifecycle`] wraps an implementation so that removing a filter
/// also purges its catches.
pub trait FilterManager {
    /// Every configured filter.
    fn all(&self) -> Vec<Filter>;

    /// Adds a filter and returns it with its assigned id.
    fn add(&mut self, kind: FilterKind, value: &str) -> Filter;

    /// Removes a filter. Returns `false` if no filter has `id`.
    fn remove(&mut self, id: &FilterId) -> bool;
}

/// Purges every catch produced by `filter`.
///
/// Returns the number of removed catches. Catches are matched on the
/// filter's [`MuteReasonKey`], so a duplicate filter with the same rule
/// loses its catches too.
pub fn on_filter_removed(filter: &Filter, catches: &mut CatchStore) -> usize {
    let reason = MuteReasonKey::encode(filter.kind, &filter.value);
    let purged = catches.remove_by_reason(&reason).unwrap_or_else(|e| {
        warn!(reason = %reason, error = %e, "mute reason does not decode, matching on filter");
        catches.remove_by_filter(filter)
    });
    if purged > 0 {
        metrics::counter!(CATCHES_PURGED).increment(u64::try_from(purged).unwrap_or(u64::MAX));
    }
    debug!(filter_kind = %filter.kind, purged, "catches purged for removed filter");
    purged
}

/// Wraps a [`FilterManager`] with catch cleanup.
#[derive(Debug)]
pub struct FilterLifecycle<M> {
    manager: M,
}

impl<M: FilterManager> FilterLifecycle<M> {
    /// Wraps `manager`.
    pub const fn new(manager: M) -> Self {
        Self { manager }
    }

    /// Returns the wrapped manager.
    pub const fn manager(&self) -> &M {
        &self.manager
    }

    /// Unwraps the manager.
    pub fn into_inner(self) -> M {
        self.manager
    }

    /// Adds a filter through the wrapped manager.
    pub fn add_filter(&mut self, kind: FilterKind, value: &str) -> Filter {
        let filter = self.manager.add(kind, value);
        info!(filter_id = %filter.id, filter_kind = %kind, "filter added");
        filter
    }

    /// Removes a filter and its catches.
    ///
    /// Catches are purged before the host removal runs. An unknown id purges
    /// nothing and is still passed on.
    #[instrument(skip(self, catches), fields(filter_id = %id))]
    pub fn remove_filter(&mut self, id: &FilterId, catches: &mut CatchStore) -> bool {
        if let Some(filter) = self.manager.all().into_iter().find(|filter| &filter.id == id) {
            on_filter_removed(&filter, catches);
        }
        self.manager.remove(id)
    }
}

/// Filter list kept in memory with sequential ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFilterManager {
    filters: Vec<Filter>,
    next_id: u64,
}

impl InMemoryFilterManager {
    /// Creates an empty filter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: Vec::new(),
            next_id: 0,
        }
    }
}

impl FilterManager for InMemoryFilterManager {
    fn all(&self) -> Vec<Filter> {
        self.filters.clone()
    }

    fn add(&mut self, kind: FilterKind, value: &str) -> Filter {
        self.next_id += 1;
        let filter = Filter::new(self.next_id.to_string(), kind, value);
        self.filters.push(filter.clone());
        filter
    }

    fn remove(&mut self, id: &FilterId) -> bool {
        let before = self.filters.len();
        self.filters.retain(|filter| &filter.id != id);
        self.filters.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catches::CatchKey;
    use crate::models::{Account, CatchRecord, Subject};

    fn catch(store: &mut CatchStore, kind: FilterKind, value: &str, user_id: &str) {
        let subject = Subject::from(&Account::new(user_id, format!("u{user_id}"), "U"));
        let record = CatchRecord::new(&Filter::new("x", kind, value), subject);
        store.set(CatchKey::encode(&record), record);
    }

    #[test]
    fn test_remove_filter_purges_catches() {
        let mut lifecycle = FilterLifecycle::new(InMemoryFilterManager::new());
        let below = lifecycle.add_filter(FilterKind::FollowerCountBelow, "100");
        lifecycle.add_filter(FilterKind::TextRegex, "spam");

        let mut store = CatchStore::new();
        catch(&mut store, FilterKind::FollowerCountBelow, "100", "1");
        catch(&mut store, FilterKind::FollowerCountBelow, "100", "2");
        catch(&mut store, FilterKind::TextRegex, "spam", "1");

        assert!(lifecycle.remove_filter(&below.id, &mut store));
        assert_eq!(store.len(), 1);
        assert_eq!(lifecycle.manager().all().len(), 1);
    }

    #[test]
    fn test_unknown_id_purges_nothing() {
        let mut lifecycle = FilterLifecycle::new(InMemoryFilterManager::new());
        let mut store = CatchStore::new();
        catch(&mut store, FilterKind::TextRegex, "spam", "1");

        assert!(!lifecycle.remove_filter(&FilterId::new("missing"), &mut store));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sequential_ids() {
        let mut manager = InMemoryFilterManager::new();
        let a = manager.add(FilterKind::Phrase, "a");
        let b = manager.add(FilterKind::Phrase, "b");
        assert_eq!(a.id.as_str(), "1");
        assert_eq!(b.id.as_str(), "2");
        assert!(manager.remove(&a.id));
        assert!(!manager.remove(&a.id));
    }

    #[test]
    fn test_removal_matches_values_needing_escapes() {
        let mut store = CatchStore::new();
        catch(&mut store, FilterKind::UserKeyword, "bob|$_$ 100%", "1");
        catch(&mut store, FilterKind::UserKeyword, "bob|other", "1");
        catch(&mut store, FilterKind::TextRegex, "bob|$_$ 100%", "1");

        let filter = Filter::new("3", FilterKind::UserKeyword, "bob|$_$ 100%");
        assert_eq!(on_filter_removed(&filter, &mut store), 1);
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|(_, record)| !record.is_from(&filter)));
    }

    #[test]
    fn test_on_filter_removed_counts() {
        let mut store = CatchStore::new();
        catch(&mut store, FilterKind::HandleRegex, "bot", "1");
        let filter = Filter::new("9", FilterKind::HandleRegex, "bot");
        assert_eq!(on_filter_removed(&filter, &mut store), 1);
        assert_eq!(on_filter_removed(&filter, &mut store), 0);
    }
}

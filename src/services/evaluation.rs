//! Evaluation pipeline.
//!
//! Runs the predicate for an `(item, filter)` pair and reconciles the catch
//! store with the result.

use super::{BasicNativeFilters, NativeFilters};
use crate::catches::{CatchKey, CatchStore};
use crate::config::{EngineConfig, FeatureFlags};
use crate::filters::{FilterRegistry, PatternCache, subject};
use crate::models::{CatchRecord, FeedItem, Filter};
use crate::observability::metrics::{CATCHES_LOGGED, CATCHES_REVOKED, EVALUATIONS};
use crate::storage::PreferenceStore;
use crate::Result;
use tracing::{debug, instrument, trace};

/// What [`MuteEngine::reconcile`] did with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Catch tracking is disabled.
    Disabled,
    /// The filter kind is never logged.
    Untracked,
    /// No identity could be resolved from the item.
    NoSubject,
    /// A user-scoped catch was removed because the item passes again.
    Revoked,
    /// The catch already exists and stays.
    Retained,
    /// The item passes and nothing was logged.
    Passed,
    /// The resolved subject is not the item's author.
    Misattributed,
    /// A new catch was written.
    Logged,
}

impl ReconcileOutcome {
    /// Whether the store was changed.
    #[must_use]
    pub const fn mutated(self) -> bool {
        matches!(self, Self::Revoked | Self::Logged)
    }
}

/// Filter evaluation with catch tracking.
///
/// Replaces the host's per-filter `pass`: built-in kinds are matched through
/// the [`FilterRegistry`], host kinds through the injected
/// [`NativeFilters`]. Every result is reported to [`Self::reconcile`].
///
/// # Example
///
/// ```rust
/// use feedmute::models::{Account, FeedItem, Filter, FilterKind};
/// use feedmute::services::MuteEngine;
///
/// let mut engine = MuteEngine::new();
/// let filter = Filter::new("1", FilterKind::TextRegex, "spam");
/// let item = FeedItem::new("42", "buy spam", Account::new("7", "seller", "Seller"));
///
/// assert!(!engine.evaluate(&item, &filter));
/// assert_eq!(engine.catches().len(), 1);
/// ```
#[derive(Debug)]
pub struct MuteEngine<N = BasicNativeFilters> {
    catches: CatchStore,
    patterns: PatternCache,
    native: N,
    features: FeatureFlags,
    storage_key: String,
}

impl MuteEngine<BasicNativeFilters> {
    /// Creates an engine with an empty store and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_native(&EngineConfig::default(), CatchStore::new(), BasicNativeFilters)
    }
}

impl Default for MuteEngine<BasicNativeFilters> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NativeFilters> MuteEngine<N> {
    /// Creates an engine around an existing store.
    #[must_use]
    pub fn with_native(config: &EngineConfig, catches: CatchStore, native: N) -> Self {
        Self {
            catches,
            patterns: PatternCache::new(config.pattern_cache_capacity),
            native,
            features: config.features,
            storage_key: config.storage_key.clone(),
        }
    }

    /// Creates an engine whose store is seeded from `prefs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference store fails.
    pub fn load(config: &EngineConfig, prefs: &dyn PreferenceStore, native: N) -> Result<Self> {
        let catches = CatchStore::load(prefs, &config.storage_key)?;
        Ok(Self::with_native(config, catches, native))
    }

    /// Writes the catch store to `prefs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference store rejects the write.
    pub fn flush(&self, prefs: &mut dyn PreferenceStore) -> Result<()> {
        self.catches.flush(prefs, &self.storage_key)
    }

    /// Returns the catch store.
    pub const fn catches(&self) -> &CatchStore {
        &self.catches
    }

    /// Returns the catch store mutably, for lifecycle hooks.
    pub const fn catches_mut(&mut self) -> &mut CatchStore {
        &mut self.catches
    }

    /// Returns the host predicate collaborator.
    pub const fn native(&self) -> &N {
        &self.native
    }

    /// Drops every catch, e.g. after importing settings.
    pub fn clear_catches(&mut self) {
        self.catches.clear();
    }

    /// Runs the predicate for `filter` only, without tracking.
    pub fn matches(&mut self, item: &FeedItem, filter: &Filter) -> bool {
        FilterRegistry::definition(filter.kind).map_or_else(
            || self.native.pass(filter, item),
            |definition| definition.matches(filter, item, &mut self.patterns),
        )
    }

    /// Evaluates `filter` against `item` and tracks the result.
    ///
    /// Returns `true` if the item stays visible.
    #[instrument(
        level = "trace",
        skip(self, item, filter),
        fields(filter_kind = %filter.kind, item_id = %item.id)
    )]
    pub fn evaluate(&mut self, item: &FeedItem, filter: &Filter) -> bool {
        let should_display = self.matches(item, filter);
        metrics::counter!(
            EVALUATIONS,
            "kind" => filter.kind.as_str(),
            "outcome" => if should_display { "pass" } else { "suppress" }
        )
        .increment(1);

        self.reconcile(item, filter, should_display);
        should_display
    }

    /// Reconciles the catch store with a predicate result.
    ///
    /// Repeating a call with the same arguments leaves the store unchanged.
    pub fn reconcile(
        &mut self,
        item: &FeedItem,
        filter: &Filter,
        should_display: bool,
    ) -> ReconcileOutcome {
        let outcome = self.apply(item, filter, should_display);
        trace!(filter_kind = %filter.kind, item_id = %item.id, ?outcome, "reconciled");
        outcome
    }

    fn apply(
        &mut self,
        item: &FeedItem,
        filter: &Filter,
        should_display: bool,
    ) -> ReconcileOutcome {
        if !self.features.catch_tracking {
            return ReconcileOutcome::Disabled;
        }
        if !filter.kind.is_loggable() {
            return ReconcileOutcome::Untracked;
        }
        let Some(subject) = subject::resolve(item) else {
            return ReconcileOutcome::NoSubject;
        };

        let record = CatchRecord::new(filter, subject);
        let key = CatchKey::encode(&record);

        if self.catches.has(&key) {
            if should_display && filter.kind.is_user_scoped() {
                self.catches.delete(&key);
                debug!(catch_key = %key, "catch revoked");
                metrics::counter!(CATCHES_REVOKED).increment(1);
                return ReconcileOutcome::Revoked;
            }
            return ReconcileOutcome::Retained;
        }

        if should_display {
            return ReconcileOutcome::Passed;
        }

        if filter.kind.is_user_scoped()
            && item.author_handle() != Some(record.user.screen_name.as_str())
        {
            return ReconcileOutcome::Misattributed;
        }

        debug!(catch_key = %key, "catch logged");
        self.catches.set(key, record);
        metrics::counter!(CATCHES_LOGGED).increment(1);
        ReconcileOutcome::Logged
    }
}

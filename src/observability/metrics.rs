//! Metric names.
//!
//! Counters are emitted through the `metrics` facade. The crate installs no
//! recorder; without one the calls are no-ops.

/// Catches written to the store.
pub const CATCHES_LOGGED: &str = "feedmute_catches_logged_total";
/// User-scoped catches removed because the item passes again.
pub const CATCHES_REVOKED: &str = "feedmute_catches_revoked_total";
/// Catches removed with their filter.
pub const CATCHES_PURGED: &str = "feedmute_catches_purged_total";
/// Persisted catches discarded by the structural check.
pub const CATCHES_DROPPED_ON_LOAD: &str = "feedmute_catches_dropped_on_load_total";
/// Filter patterns that failed to compile.
pub const PATTERN_COMPILE_FAILURES: &str = "feedmute_pattern_compile_failures_total";
/// Predicate evaluations, labelled by `kind` and `outcome`.
pub const EVALUATIONS: &str = "feedmute_evaluations_total";

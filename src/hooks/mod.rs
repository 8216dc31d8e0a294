//! Host lifecycle hooks.
//!
//! | Hook | Trigger | Effect |
//! |------|---------|--------|
//! | [`FilterLifecycle::remove_filter`] | Filter removed | Purges its catches, then removes it |
//! | [`FilterLifecycle::add_filter`] | Filter added | Passed through |
//! | [`MuteEngine::clear_catches`] | Settings imported | Empties the store |
//!
//! [`MuteEngine::clear_catches`]: crate::services::MuteEngine::clear_catches

mod lifecycle;

pub use lifecycle::{FilterLifecycle, FilterManager, InMemoryFilterManager, on_filter_removed};

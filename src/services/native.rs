//! Host-owned filter kinds.

use crate::models::{FeedItem, Filter, FilterKind};

/// The host's own matching for kinds the registry does not define.
///
/// Injected into [`MuteEngine`](super::MuteEngine) in place of the host's
/// original `pass` so that passthrough kinds are still tracked.
/// Implementations must not panic: they run inside the host's filtering pass.
pub trait NativeFilters {
    /// Returns `true` if the item stays visible.
    fn pass(&self, filter: &Filter, item: &FeedItem) -> bool;

    /// Description shown next to a configured filter.
    fn display_type(&self, filter: &Filter) -> String;
}

/// Case-insensitive substring matching for `phrase` and `source` filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNativeFilters;

impl NativeFilters for BasicNativeFilters {
    fn pass(&self, filter: &Filter, item: &FeedItem) -> bool {
        let needle = filter.value.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        match filter.kind {
            FilterKind::Phrase => !item.filterable_text().to_lowercase().contains(&needle),
            FilterKind::Source => item
                .source
                .as_ref()
                .is_none_or(|source| !source.to_lowercase().contains(&needle)),
            _ => true,
        }
    }

    fn display_type(&self, filter: &Filter) -> String {
        match filter.kind {
            FilterKind::Phrase => "words or phrases".to_string(),
            FilterKind::Source => "tweets from client".to_string(),
            other => other.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    #[test]
    fn test_phrase() {
        let item = FeedItem::new("1", "Breaking NEWS today", Account::new("1", "a", "A"));
        let native = BasicNativeFilters;
        assert!(!native.pass(&Filter::new("f", FilterKind::Phrase, "news"), &item));
        assert!(native.pass(&Filter::new("f", FilterKind::Phrase, "sports"), &item));
        assert!(native.pass(&Filter::new("f", FilterKind::Phrase, "  "), &item));
    }

    #[test]
    fn test_source() {
        let native = BasicNativeFilters;
        let filter = Filter::new("f", FilterKind::Source, "Autoposter");
        let item = FeedItem::new("1", "x", Account::new("1", "a", "A"));
        assert!(native.pass(&filter, &item));
        assert!(!native.pass(&filter, &item.clone().with_source("AutoPoster Pro")));
        assert!(native.pass(&filter, &item.with_source("Web App")));
    }
}

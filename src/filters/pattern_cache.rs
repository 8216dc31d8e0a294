//! Bounded cache of compiled filter patterns.

use crate::observability::metrics::PATTERN_COMPILE_FAILURES;
use lru::LruCache;
use regex::{Regex, RegexBuilder};
use std::num::NonZeroUsize;
use tracing::warn;

/// Default number of compiled patterns kept.
pub const DEFAULT_PATTERN_CACHE_CAPACITY: usize = 256;

/// LRU cache mapping a pattern source to its compiled, case-insensitive
/// regex.
///
/// Invalid patterns are cached as `None` so a broken filter is reported
/// once, not on every item.
#[derive(Debug)]
pub struct PatternCache {
    cache: LruCache<String, Option<Regex>>,
}

impl PatternCache {
    /// Creates a cache holding at most `capacity` patterns (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Returns the compiled pattern, or `None` if it does not compile.
    pub fn get(&mut self, pattern: &str) -> Option<&Regex> {
        if !self.cache.contains(pattern) {
            let compiled = compile(pattern);
            self.cache.put(pattern.to_string(), compiled);
        }
        self.cache.get(pattern).and_then(Option::as_ref)
    }

    /// Whether `pattern` matches anywhere in `haystack`.
    ///
    /// An invalid pattern never matches.
    pub fn is_match(&mut self, pattern: &str, haystack: &str) -> bool {
        self.get(pattern).is_some_and(|regex| regex.is_match(haystack))
    }

    /// Number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN_CACHE_CAPACITY)
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern, error = %e, "filter pattern does not compile, ignoring");
            metrics::counter!(PATTERN_COMPILE_FAILURES).increment(1);
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let mut cache = PatternCache::default();
        assert!(cache.is_match("spam", "Buy SPAM now"));
        assert!(!cache.is_match("^spam$", "spam and eggs"));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let mut cache = PatternCache::default();
        assert!(!cache.is_match("(unclosed", "(unclosed"));
        assert!(cache.get("(unclosed").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut cache = PatternCache::new(2);
        cache.is_match("a", "a");
        cache.is_match("b", "b");
        cache.is_match("c", "c");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = PatternCache::new(0);
        assert!(cache.is_match("x", "x"));
        assert_eq!(cache.len(), 1);
    }
}

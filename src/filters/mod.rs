//! Filter registry, predicates and subject resolution.
//!
//! Each built-in [`FilterKind`](crate::models::FilterKind) has one
//! [`FilterDefinition`] holding its predicate and presentation metadata.
//! Lookup is a total match over the enumeration, so adding a kind without a
//! registry entry fails to compile.
//!
//! Predicates share one contract: return `true` to keep the item visible,
//! `false` to suppress it, and let the item through when the identity they
//! inspect is missing.

mod pattern_cache;
mod predicates;
mod registry;
pub mod subject;

pub use pattern_cache::{DEFAULT_PATTERN_CACHE_CAPACITY, PatternCache};
pub use predicates::{Predicate, USER_KEYWORD_DELIMITER, parse_threshold, split_user_keyword};
pub use registry::{
    ActionTemplate, FilterDefinition, FilterRegistry, ITEM_ID_PLACEHOLDER,
    SCREEN_NAME_PLACEHOLDER, Visibility,
};

//! # Feedmute
//!
//! Content filtering with catch tracking for social feed clients.
//!
//! Feedmute evaluates user-configured mute filters against feed items and
//! records every suppression as a *catch*, so a client can show which rules
//! hid what, and from whom.
//!
//! ## Features
//!
//! - Twelve built-in filter kinds (regex on text, handle and display name,
//!   follower thresholds, avatars, biographies, retweet/quote sources)
//! - Passthrough of host-owned kinds through an injected predicate
//! - Deduplicated, idempotent catch store persisted as ordered pairs
//! - Catch cleanup when a filter is removed
//!
//! ## Example
//!
//! ```rust
//! use feedmute::models::{Account, FeedItem, Filter, FilterKind};
//! use feedmute::MuteEngine;
//!
//! let mut engine = MuteEngine::new();
//! let filter = Filter::new("1", FilterKind::FollowerCountBelow, "100");
//! let author = Account::new("7", "newcomer", "New").with_followers(12);
//!
//! assert!(!engine.evaluate(&FeedItem::new("1", "hello", author), &filter));
//! assert_eq!(engine.catches().len(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod catches;
pub mod config;
pub mod filters;
pub mod hooks;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use catches::{CatchKey, CatchStore, MuteReasonKey};
pub use config::{EngineConfig, FeatureFlags};
pub use filters::FilterRegistry;
pub use hooks::{FilterLifecycle, FilterManager};
pub use models::{Account, CatchRecord, FeedItem, Filter, FilterId, FilterKind, Subject};
pub use services::{BasicNativeFilters, MuteEngine, NativeFilters, ReconcileOutcome};
pub use storage::{FilePreferences, MemoryPreferences, PreferenceStore};

/// Error type for feedmute operations.
///
/// Filter evaluation itself never fails: predicates let items through on
/// bad input. Errors come from keys, persistence and configuration.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown filter kind, preferences file that is not a JSON object or exceeds the size cap |
/// | `InvalidKey` | Catch or mute-reason key that does not decode |
/// | `OperationFailed` | I/O errors, JSON or TOML parse failures, logging init |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A catch or mute-reason key could not be decoded.
    ///
    /// Raised when:
    /// - The key has fewer separators than its shape requires
    /// - The kind prefix is not a known filter kind
    /// - A percent escape is malformed or decodes to invalid UTF-8
    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - The preferences file or config file does not parse
    /// - The logging subscriber cannot be installed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for feedmute operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::InvalidKey {
            key: "x".to_string(),
            reason: "missing separator".to_string(),
        };
        assert_eq!(err.to_string(), "invalid key 'x': missing separator");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");
    }
}

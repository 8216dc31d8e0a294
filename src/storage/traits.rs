//! Preference store trait.

use crate::Result;
use serde_json::Value;

/// Key-value store of structured preferences owned by the host.
///
/// The engine only reads catches at startup and writes them on an explicit
/// flush; cadence is the host's decision.
pub trait PreferenceStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Returns the value under `key`, or `default` when absent.
    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

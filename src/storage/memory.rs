//! In-memory preference store.

use super::PreferenceStore;
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Preference store backed by a `HashMap`, for tests and embedders that
/// persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, Value>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: Value) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value);
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_set() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("a").unwrap(), None);
        prefs.set("a", json!([1, 2])).unwrap();
        assert_eq!(prefs.get("a").unwrap(), Some(json!([1, 2])));
    }

    #[test]
    fn test_get_or_default() {
        let prefs = MemoryPreferences::with_value("present", json!(true));
        assert_eq!(prefs.get_or("missing", json!([])).unwrap(), json!([]));
        assert_eq!(prefs.get_or("present", json!(false)).unwrap(), json!(true));
    }
}

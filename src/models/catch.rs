//! Catch records: the persisted form of a suppressed match.

use super::{Account, Filter, FilterKind};
use serde::{Deserialize, Serialize};

/// Simplified identity a catch is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Avatar URL.
    pub avatar: String,
    /// Account identifier.
    pub id: String,
    /// Handle.
    pub screen_name: String,
    /// Display name.
    pub name: String,
}

impl From<&Account> for Subject {
    fn from(account: &Account) -> Self {
        Self {
            avatar: account.profile_image_url.clone(),
            id: account.id.clone(),
            screen_name: account.screen_name.clone(),
            name: account.name.clone(),
        }
    }
}

/// A logged match of one filter against one subject.
///
/// Serialized field names (`filterType`, `value`, `user`) are the persisted
/// shape and are read back by [`CatchStore::load`](crate::catches::CatchStore::load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchRecord {
    /// Kind of the filter that matched.
    #[serde(rename = "filterType")]
    pub filter_kind: FilterKind,
    /// Value of the filter that matched.
    pub value: String,
    /// Identity the match is attributed to.
    pub user: Subject,
}

impl CatchRecord {
    /// Builds a record for `filter` attributed to `subject`.
    #[must_use]
    pub fn new(filter: &Filter, subject: Subject) -> Self {
        Self {
            filter_kind: filter.kind,
            value: filter.value.clone(),
            user: subject,
        }
    }

    /// Whether this record was produced by a filter with the same rule.
    #[must_use]
    pub fn is_from(&self, filter: &Filter) -> bool {
        self.filter_kind == filter.kind && self.value == filter.value
    }
}

//! Filter kinds and user-configured filters.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of filter kinds understood by the engine.
///
/// Twelve kinds carry a built-in predicate. [`FilterKind::Source`] and
/// [`FilterKind::Phrase`] are passthrough kinds whose matching is owned by
/// the host client (see [`NativeFilters`](crate::services::NativeFilters)).
///
/// The wire identifiers (`BTD_*`) are shared with other clients that
/// persist the same filter and catch data, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKind {
    /// Regular expression against the item's filterable text.
    #[serde(rename = "BTD_regex")]
    TextRegex,
    /// Regular expression against the author's display name.
    #[serde(rename = "BTD_mute_displayname")]
    DisplayNameRegex,
    /// Regular expression against the author's handle.
    #[serde(rename = "BTD_user_regex")]
    HandleRegex,
    /// `user|keyword`: a keyword muted only when posted by one user.
    #[serde(rename = "BTD_mute_user_keyword")]
    UserKeyword,
    /// Authors whose biography contains a phrase.
    #[serde(rename = "BTD_user_biographies")]
    UserBiography,
    /// Authors still using the default profile picture.
    #[serde(rename = "BTD_default_avatars")]
    DefaultAvatar,
    /// Authors displaying an NFT avatar.
    #[serde(rename = "BTD_nft_avatar")]
    NftAvatar,
    /// Authors with fewer followers than a threshold.
    #[serde(rename = "BTD_follower_count_less_than")]
    FollowerCountBelow,
    /// Authors with more followers than a threshold.
    #[serde(rename = "BTD_follower_count_greater_than")]
    FollowerCountAbove,
    /// Retweets made by a given handle.
    #[serde(rename = "BTD_is_retweet_from")]
    RetweetFrom,
    /// Quotes made by a given handle.
    #[serde(rename = "BTD_mute_quotes")]
    QuoteFrom,
    /// One specific item, by id.
    #[serde(rename = "BTD_specific_tweet")]
    SpecificItem,
    /// Host filter on the posting client.
    #[serde(rename = "source")]
    Source,
    /// Host filter on a plain phrase.
    #[serde(rename = "phrase")]
    Phrase,
}

/// How a filter kind relates to catch logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchScope {
    /// Content-only match; logged, kept as history once logged.
    Content,
    /// Match tied to one identity; logged and revoked once it stops matching.
    User,
    /// Evaluated but never logged.
    Untracked,
}

impl FilterKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::NftAvatar,
        Self::SpecificItem,
        Self::RetweetFrom,
        Self::UserKeyword,
        Self::DisplayNameRegex,
        Self::TextRegex,
        Self::HandleRegex,
        Self::QuoteFrom,
        Self::UserBiography,
        Self::DefaultAvatar,
        Self::FollowerCountBelow,
        Self::FollowerCountAbove,
        Self::Source,
        Self::Phrase,
    ];

    /// Returns the stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextRegex => "BTD_regex",
            Self::DisplayNameRegex => "BTD_mute_displayname",
            Self::HandleRegex => "BTD_user_regex",
            Self::UserKeyword => "BTD_mute_user_keyword",
            Self::UserBiography => "BTD_user_biographies",
            Self::DefaultAvatar => "BTD_default_avatars",
            Self::NftAvatar => "BTD_nft_avatar",
            Self::FollowerCountBelow => "BTD_follower_count_less_than",
            Self::FollowerCountAbove => "BTD_follower_count_greater_than",
            Self::RetweetFrom => "BTD_is_retweet_from",
            Self::QuoteFrom => "BTD_mute_quotes",
            Self::SpecificItem => "BTD_specific_tweet",
            Self::Source => "source",
            Self::Phrase => "phrase",
        }
    }

    /// Parses a wire identifier, returning `None` for unknown kinds.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Returns the catch-logging scope of this kind.
    #[must_use]
    pub const fn catch_scope(self) -> CatchScope {
        match self {
            Self::Source | Self::Phrase | Self::TextRegex => CatchScope::Content,
            Self::DefaultAvatar
            | Self::FollowerCountAbove
            | Self::FollowerCountBelow
            | Self::UserKeyword
            | Self::NftAvatar
            | Self::DisplayNameRegex
            | Self::UserBiography
            | Self::HandleRegex => CatchScope::User,
            Self::RetweetFrom | Self::QuoteFrom | Self::SpecificItem => CatchScope::Untracked,
        }
    }

    /// Whether matches of this kind are written to the catch store.
    #[must_use]
    pub const fn is_loggable(self) -> bool {
        !matches!(self.catch_scope(), CatchScope::Untracked)
    }

    /// Whether matches of this kind are tied to a specific identity.
    #[must_use]
    pub const fn is_user_scoped(self) -> bool {
        matches!(self.catch_scope(), CatchScope::User)
    }

    /// Whether this kind is matched by the host rather than by the registry.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Source | Self::Phrase)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidInput(format!("unknown filter kind: {s}")))
    }
}

/// Opaque identifier of a configured filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    /// Creates a new filter ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FilterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user-configured filter.
///
/// Matching depends only on `(kind, value)`; `id` identifies the filter for
/// lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Unique identifier.
    pub id: FilterId,
    /// Filter kind.
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Raw user input.
    pub value: String,
}

impl Filter {
    /// Creates a new filter.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            id: FilterId::new(id),
            kind,
            value: value.into(),
        }
    }

    /// Whether two filters share the same matching behaviour.
    #[must_use]
    pub fn same_rule(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrips_through_wire_id() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.to_string().parse::<FilterKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(FilterKind::parse("BTD_unknown").is_none());
        assert!("".parse::<FilterKind>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_id() {
        let json = serde_json::to_string(&FilterKind::FollowerCountBelow).unwrap_or_default();
        assert_eq!(json, "\"BTD_follower_count_less_than\"");
    }

    #[test]
    fn test_allowlist() {
        let loggable: Vec<_> = FilterKind::ALL
            .into_iter()
            .filter(|k| k.is_loggable())
            .collect();
        assert_eq!(loggable.len(), 11);
        assert!(!FilterKind::RetweetFrom.is_loggable());
        assert!(!FilterKind::QuoteFrom.is_loggable());
        assert!(!FilterKind::SpecificItem.is_loggable());
        assert!(FilterKind::Phrase.is_loggable());
        assert!(!FilterKind::TextRegex.is_user_scoped());
        assert!(FilterKind::HandleRegex.is_user_scoped());
    }

    #[test]
    fn test_same_rule_ignores_id() {
        let a = Filter::new("1", FilterKind::TextRegex, "spam");
        let b = Filter::new("2", FilterKind::TextRegex, "spam");
        let c = Filter::new("1", FilterKind::Phrase, "spam");
        assert!(a.same_rule(&b));
        assert!(!a.same_rule(&c));
    }
}

//! Static catalogue of built-in filter kinds.

use super::PatternCache;
use super::predicates::{self, Predicate};
use crate::models::{FeedItem, Filter, FilterKind};
use crate::services::NativeFilters;

/// Where a filter kind is offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    /// Listed in the global filter settings.
    pub exposed_globally: bool,
    /// Offered from an item's action menu.
    pub exposed_as_action: bool,
}

impl Visibility {
    const GLOBAL: Self = Self {
        exposed_globally: true,
        exposed_as_action: false,
    };
    const ACTION: Self = Self {
        exposed_globally: false,
        exposed_as_action: true,
    };
    const HIDDEN: Self = Self {
        exposed_globally: false,
        exposed_as_action: false,
    };
}

/// Action-menu entry that creates a filter from an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTemplate {
    /// Value template, expanded by [`FilterRegistry::render_action`].
    pub template: &'static str,
    /// Menu label, when it differs from `Mute <name>`.
    pub label: Option<&'static str>,
}

/// Template placeholder for the author's handle.
pub const SCREEN_NAME_PLACEHOLDER: &str = "{{screenName}}";

/// Template placeholder for the item id.
pub const ITEM_ID_PLACEHOLDER: &str = "{{chirp.id}}";

const DEFAULT_ACTION: ActionTemplate = ActionTemplate {
    template: SCREEN_NAME_PLACEHOLDER,
    label: None,
};

/// Registry entry for one built-in kind.
#[derive(Debug, Clone, Copy)]
pub struct FilterDefinition {
    /// Kind this entry describes.
    pub kind: FilterKind,
    /// Menu label.
    pub name: &'static str,
    /// Phrase shown in the filter list, e.g. "tweets matching".
    pub descriptor: &'static str,
    /// Input hint for the value field.
    pub placeholder: &'static str,
    /// Where the kind is offered.
    pub visibility: Visibility,
    /// Explicit action-menu template, when the default does not fit.
    pub action: Option<ActionTemplate>,
    /// Matching function.
    pub predicate: Predicate,
}

static NFT_AVATAR: FilterDefinition = FilterDefinition {
    kind: FilterKind::NftAvatar,
    name: "Mute accounts with an NFT avatar",
    descriptor: "accounts with an NFT avatar",
    placeholder: "nothing!",
    visibility: Visibility::HIDDEN,
    action: None,
    predicate: predicates::nft_avatar,
};

static SPECIFIC_ITEM: FilterDefinition = FilterDefinition {
    kind: FilterKind::SpecificItem,
    name: "Specific tweet",
    descriptor: "specific tweet",
    placeholder: "ID of tweet",
    visibility: Visibility::HIDDEN,
    action: Some(ActionTemplate {
        template: ITEM_ID_PLACEHOLDER,
        label: Some("Hide this tweet"),
    }),
    predicate: predicates::specific_item,
};

static RETWEET_FROM: FilterDefinition = FilterDefinition {
    kind: FilterKind::RetweetFrom,
    name: "Retweets from User",
    descriptor: "retweets from",
    placeholder: "e.g. tweetdeck",
    visibility: Visibility::ACTION,
    action: None,
    predicate: predicates::retweet_from,
};

static USER_KEYWORD: FilterDefinition = FilterDefinition {
    kind: FilterKind::UserKeyword,
    name: "Keyword from User",
    descriptor: "user|keyword: ",
    placeholder: "e.g. tweetdeck|feature",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::user_keyword,
};

static DISPLAY_NAME_REGEX: FilterDefinition = FilterDefinition {
    kind: FilterKind::DisplayNameRegex,
    name: "Display name (Regular Expression)",
    descriptor: "display names matching",
    placeholder: "Enter a keyword or phrase",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::display_name_regex,
};

static TEXT_REGEX: FilterDefinition = FilterDefinition {
    kind: FilterKind::TextRegex,
    name: "Tweet Text (Regular Expression)",
    descriptor: "tweets matching",
    placeholder: "Enter a regular expression",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::text_regex,
};

static HANDLE_REGEX: FilterDefinition = FilterDefinition {
    kind: FilterKind::HandleRegex,
    name: "Username (Regular Expression)",
    descriptor: "usernames matching",
    placeholder: "Enter a regular expression",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::handle_regex,
};

static QUOTE_FROM: FilterDefinition = FilterDefinition {
    kind: FilterKind::QuoteFrom,
    name: "Quotes from User",
    descriptor: "quotes from",
    placeholder: "e.g. tweetdeck",
    visibility: Visibility::ACTION,
    action: None,
    predicate: predicates::quote_from,
};

static USER_BIOGRAPHY: FilterDefinition = FilterDefinition {
    kind: FilterKind::UserBiography,
    name: "Biography",
    descriptor: "users whose bio contains",
    placeholder: "Enter a keyword or phrase",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::user_biography,
};

static DEFAULT_AVATAR: FilterDefinition = FilterDefinition {
    kind: FilterKind::DefaultAvatar,
    name: "Default Profile Pictures",
    descriptor: "users having a default profile picture",
    placeholder: "Write something random here",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::default_avatar,
};

static FOLLOWER_COUNT_BELOW: FilterDefinition = FilterDefinition {
    kind: FilterKind::FollowerCountBelow,
    name: "Follower count less than",
    descriptor: "users with less followers than",
    placeholder: "Enter a number",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::follower_count_below,
};

static FOLLOWER_COUNT_ABOVE: FilterDefinition = FilterDefinition {
    kind: FilterKind::FollowerCountAbove,
    name: "Follower count more than",
    descriptor: "users with more followers than",
    placeholder: "Enter a number",
    visibility: Visibility::GLOBAL,
    action: None,
    predicate: predicates::follower_count_above,
};

impl FilterDefinition {
    /// Evaluates the predicate; `true` means the item stays visible.
    pub fn matches(&self, filter: &Filter, item: &FeedItem, patterns: &mut PatternCache) -> bool {
        (self.predicate)(filter, item, patterns)
    }

    /// Action-menu template, if the kind is offered as an action.
    #[must_use]
    pub const fn action_template(&self) -> Option<ActionTemplate> {
        match self.action {
            Some(action) => Some(action),
            None if self.visibility.exposed_as_action => Some(DEFAULT_ACTION),
            None => None,
        }
    }

    /// Label shown in the action menu.
    #[must_use]
    pub fn action_label(&self) -> Option<String> {
        self.action_template().map(|action| {
            action
                .label
                .map_or_else(|| format!("Mute {}", self.name), str::to_string)
        })
    }
}

/// Lookup over the built-in filter kinds.
pub struct FilterRegistry;

impl FilterRegistry {
    /// Returns the definition of a built-in kind, `None` for host kinds.
    #[must_use]
    pub fn definition(kind: FilterKind) -> Option<&'static FilterDefinition> {
        match kind {
            FilterKind::NftAvatar => Some(&NFT_AVATAR),
            FilterKind::SpecificItem => Some(&SPECIFIC_ITEM),
            FilterKind::RetweetFrom => Some(&RETWEET_FROM),
            FilterKind::UserKeyword => Some(&USER_KEYWORD),
            FilterKind::DisplayNameRegex => Some(&DISPLAY_NAME_REGEX),
            FilterKind::TextRegex => Some(&TEXT_REGEX),
            FilterKind::HandleRegex => Some(&HANDLE_REGEX),
            FilterKind::QuoteFrom => Some(&QUOTE_FROM),
            FilterKind::UserBiography => Some(&USER_BIOGRAPHY),
            FilterKind::DefaultAvatar => Some(&DEFAULT_AVATAR),
            FilterKind::FollowerCountBelow => Some(&FOLLOWER_COUNT_BELOW),
            FilterKind::FollowerCountAbove => Some(&FOLLOWER_COUNT_ABOVE),
            FilterKind::Source | FilterKind::Phrase => None,
        }
    }

    /// Every built-in definition, in declaration order.
    pub fn definitions() -> impl Iterator<Item = &'static FilterDefinition> {
        FilterKind::ALL.into_iter().filter_map(Self::definition)
    }

    /// Kinds listed in the global filter settings.
    #[must_use]
    pub fn global_kinds() -> Vec<FilterKind> {
        Self::definitions()
            .filter(|def| def.visibility.exposed_globally)
            .map(|def| def.kind)
            .collect()
    }

    /// Kinds offered from an item's action menu.
    #[must_use]
    pub fn action_kinds() -> Vec<FilterKind> {
        Self::definitions()
            .filter(|def| def.action_template().is_some())
            .map(|def| def.kind)
            .collect()
    }

    /// Input hint for `kind`, `None` for host kinds.
    #[must_use]
    pub fn placeholder_for(kind: FilterKind) -> Option<&'static str> {
        Self::definition(kind).map(|def| def.placeholder)
    }

    /// Description shown next to a configured filter.
    pub fn display_type(filter: &Filter, native: &dyn NativeFilters) -> String {
        Self::definition(filter.kind).map_or_else(
            || native.display_type(filter),
            |def| def.descriptor.to_string(),
        )
    }

    /// Expands the action template of `kind` against `item`.
    ///
    /// Returns the filter value to add, or `None` if the kind has no action
    /// or the item lacks the field the template needs.
    #[must_use]
    pub fn render_action(kind: FilterKind, item: &FeedItem) -> Option<String> {
        let template = Self::definition(kind)?.action_template()?.template;
        let mut rendered = template.to_string();
        if rendered.contains(SCREEN_NAME_PLACEHOLDER) {
            let handle = item.user.as_ref()?.normalized_handle();
            rendered = rendered.replace(SCREEN_NAME_PLACEHOLDER, &handle);
        }
        if rendered.contains(ITEM_ID_PLACEHOLDER) {
            if item.id.is_empty() {
                return None;
            }
            rendered = rendered.replace(ITEM_ID_PLACEHOLDER, &item.id);
        }
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    struct HostDescriptions;

    impl NativeFilters for HostDescriptions {
        fn pass(&self, _filter: &Filter, _item: &FeedItem) -> bool {
            true
        }

        fn display_type(&self, filter: &Filter) -> String {
            format!("host:{}", filter.kind)
        }
    }

    #[test]
    fn test_every_builtin_kind_has_a_definition() {
        for kind in FilterKind::ALL {
            let def = FilterRegistry::definition(kind);
            assert_eq!(def.is_some(), !kind.is_native(), "{kind}");
            if let Some(def) = def {
                assert_eq!(def.kind, kind);
            }
        }
        assert_eq!(FilterRegistry::definitions().count(), 12);
    }

    #[test]
    fn test_global_kinds() {
        let kinds = FilterRegistry::global_kinds();
        assert_eq!(
            kinds,
            vec![
                FilterKind::UserKeyword,
                FilterKind::DisplayNameRegex,
                FilterKind::TextRegex,
                FilterKind::HandleRegex,
                FilterKind::UserBiography,
                FilterKind::DefaultAvatar,
                FilterKind::FollowerCountBelow,
                FilterKind::FollowerCountAbove,
            ]
        );
    }

    #[test]
    fn test_action_kinds_and_labels() {
        assert_eq!(
            FilterRegistry::action_kinds(),
            vec![
                FilterKind::SpecificItem,
                FilterKind::RetweetFrom,
                FilterKind::QuoteFrom
            ]
        );
        let specific = FilterRegistry::definition(FilterKind::SpecificItem).unwrap();
        assert_eq!(specific.action_label().as_deref(), Some("Hide this tweet"));
        let quotes = FilterRegistry::definition(FilterKind::QuoteFrom).unwrap();
        assert_eq!(
            quotes.action_label().as_deref(),
            Some("Mute Quotes from User")
        );
    }

    #[test]
    fn test_placeholder_and_display_type() {
        assert_eq!(
            FilterRegistry::placeholder_for(FilterKind::FollowerCountBelow),
            Some("Enter a number")
        );
        assert_eq!(FilterRegistry::placeholder_for(FilterKind::Phrase), None);

        let regex = Filter::new("1", FilterKind::TextRegex, "x");
        let phrase = Filter::new("2", FilterKind::Phrase, "x");
        assert_eq!(
            FilterRegistry::display_type(&regex, &HostDescriptions),
            "tweets matching"
        );
        assert_eq!(
            FilterRegistry::display_type(&phrase, &HostDescriptions),
            "host:phrase"
        );
    }

    #[test]
    fn test_render_action() {
        let item = FeedItem::new("555", "x", Account::new("1", "TweetDeck", "TD"));
        assert_eq!(
            FilterRegistry::render_action(FilterKind::RetweetFrom, &item).as_deref(),
            Some("tweetdeck")
        );
        assert_eq!(
            FilterRegistry::render_action(FilterKind::SpecificItem, &item).as_deref(),
            Some("555")
        );
        assert_eq!(
            FilterRegistry::render_action(FilterKind::TextRegex, &item),
            None
        );

        let orphan = FeedItem {
            id: "9".to_string(),
            ..FeedItem::default()
        };
        assert_eq!(
            FilterRegistry::render_action(FilterKind::QuoteFrom, &orphan),
            None
        );
    }
}

//! Built-in filter predicates.
//!
//! Every predicate answers "should this item stay visible?": `true` lets the
//! item through, `false` suppresses it. Items without the identity a
//! predicate needs are always let through.

use super::PatternCache;
use crate::models::{Account, FeedItem, Filter};

/// Uniform predicate signature shared by every built-in kind.
pub type Predicate = fn(&Filter, &FeedItem, &mut PatternCache) -> bool;

/// Delimiter between user and keyword in scoped-keyword values.
pub const USER_KEYWORD_DELIMITER: char = '|';

/// Parses the leading base-10 integer of `value`.
///
/// Leading whitespace and one sign are accepted and trailing characters are
/// ignored, so `"100 followers"` is `100`. Returns `None` when no digit
/// follows. Values too large for `i64` saturate.
#[must_use]
pub fn parse_threshold(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }
    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Splits a scoped-keyword value into lower-cased `(user, keyword)`.
#[must_use]
pub fn split_user_keyword(value: &str) -> Option<(String, String)> {
    let mut parts = value.split(USER_KEYWORD_DELIMITER);
    let user = parts.next()?.trim().to_lowercase();
    let keyword = parts.next()?.to_lowercase();
    if user.is_empty() || keyword.is_empty() {
        return None;
    }
    Some((user, keyword))
}

fn author(item: &FeedItem) -> Option<&Account> {
    item.user.as_ref()
}

fn handle_equals(filter: &Filter, account: &Account) -> bool {
    filter.value.trim().to_lowercase() == account.normalized_handle()
}

pub(super) fn text_regex(filter: &Filter, item: &FeedItem, patterns: &mut PatternCache) -> bool {
    !patterns.is_match(&filter.value, &item.filterable_text())
}

pub(super) fn display_name_regex(
    filter: &Filter,
    item: &FeedItem,
    patterns: &mut PatternCache,
) -> bool {
    author(item).is_none_or(|user| !patterns.is_match(&filter.value, &user.name))
}

pub(super) fn handle_regex(filter: &Filter, item: &FeedItem, patterns: &mut PatternCache) -> bool {
    author(item).is_none_or(|user| !patterns.is_match(&filter.value, &user.screen_name))
}

pub(super) fn user_keyword(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    let Some(user) = author(item) else {
        return true;
    };
    let Some((target, keyword)) = split_user_keyword(&filter.value) else {
        return true;
    };
    !(user.normalized_handle() == target && item.text.to_lowercase().contains(&keyword))
}

pub(super) fn user_biography(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    let needle = filter.value.to_lowercase();
    author(item).is_none_or(|user| !user.description.to_lowercase().contains(&needle))
}

pub(super) fn default_avatar(_: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    author(item).is_none_or(|user| !user.profile_image_url.contains("default"))
}

pub(super) fn nft_avatar(_: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    author(item)
        .and_then(|user| user.has_nft_avatar)
        .is_none_or(|has_nft| !has_nft)
}

pub(super) fn follower_count_below(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    let Some(threshold) = parse_threshold(&filter.value) else {
        return true;
    };
    author(item).is_none_or(|user| i128::from(user.followers_count) >= i128::from(threshold))
}

pub(super) fn follower_count_above(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    let Some(threshold) = parse_threshold(&filter.value) else {
        return true;
    };
    author(item).is_none_or(|user| i128::from(user.followers_count) <= i128::from(threshold))
}

pub(super) fn retweet_from(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    author(item).is_none_or(|user| !(item.is_retweet && handle_equals(filter, user)))
}

pub(super) fn quote_from(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    author(item).is_none_or(|user| !(item.is_quote && handle_equals(filter, user)))
}

pub(super) fn specific_item(filter: &Filter, item: &FeedItem, _: &mut PatternCache) -> bool {
    item.id != filter.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterKind;
    use test_case::test_case;

    fn item_by(user: Account, text: &str) -> FeedItem {
        FeedItem::new("100", text, user)
    }

    fn check(predicate: Predicate, kind: FilterKind, value: &str, item: &FeedItem) -> bool {
        predicate(
            &Filter::new("f", kind, value),
            item,
            &mut PatternCache::default(),
        )
    }

    #[test_case("100", Some(100) ; "plain")]
    #[test_case("  42abc", Some(42) ; "leading whitespace and trailing garbage")]
    #[test_case("-5", Some(-5) ; "negative")]
    #[test_case("+7", Some(7) ; "explicit plus")]
    #[test_case("abc", None ; "not a number")]
    #[test_case("", None ; "empty")]
    #[test_case("-", None ; "sign only")]
    #[test_case("99999999999999999999", Some(i64::MAX) ; "saturates")]
    fn test_parse_threshold(input: &str, expected: Option<i64>) {
        assert_eq!(parse_threshold(input), expected);
    }

    #[test_case("bob|spam", Some(("bob", "spam")) ; "simple")]
    #[test_case("Bob|SPAM", Some(("bob", "spam")) ; "lower-cased")]
    #[test_case("bob", None ; "missing keyword")]
    #[test_case("|spam", None ; "missing user")]
    #[test_case("bob|", None ; "empty keyword")]
    fn test_split_user_keyword(input: &str, expected: Option<(&str, &str)>) {
        let expected = expected.map(|(u, k)| (u.to_string(), k.to_string()));
        assert_eq!(split_user_keyword(input), expected);
    }

    #[test_case(50, "100", false ; "below threshold is muted")]
    #[test_case(150, "100", true ; "above threshold passes")]
    #[test_case(100, "100", true ; "equal passes")]
    #[test_case(0, "abc", true ; "non-numeric never matches")]
    fn test_follower_count_below(followers: u64, value: &str, expected: bool) {
        let item = item_by(Account::new("1", "a", "A").with_followers(followers), "");
        assert_eq!(
            check(follower_count_below, FilterKind::FollowerCountBelow, value, &item),
            expected
        );
    }

    #[test_case(5000, "1000", false ; "above threshold is muted")]
    #[test_case(10, "1000", true ; "below threshold passes")]
    #[test_case(5000, "lots", true ; "non-numeric never matches")]
    fn test_follower_count_above(followers: u64, value: &str, expected: bool) {
        let item = item_by(Account::new("1", "a", "A").with_followers(followers), "");
        assert_eq!(
            check(follower_count_above, FilterKind::FollowerCountAbove, value, &item),
            expected
        );
    }

    #[test]
    fn test_text_regex() {
        let item = item_by(Account::new("1", "a", "A"), "Free SPAM here");
        assert!(!check(text_regex, FilterKind::TextRegex, "spam", &item));
        assert!(check(text_regex, FilterKind::TextRegex, "^eggs", &item));
        assert!(check(text_regex, FilterKind::TextRegex, "[broken", &item));
    }

    #[test]
    fn test_name_and_handle_regex() {
        let item = item_by(Account::new("1", "crypto_bot", "Crypto King"), "");
        assert!(!check(display_name_regex, FilterKind::DisplayNameRegex, "king$", &item));
        assert!(check(display_name_regex, FilterKind::DisplayNameRegex, "queen", &item));
        assert!(!check(handle_regex, FilterKind::HandleRegex, "_bot$", &item));
        assert!(check(handle_regex, FilterKind::HandleRegex, "^human", &item));
    }

    #[test]
    fn test_user_keyword() {
        let item = item_by(Account::new("1", "TweetDeck", "TD"), "New Feature shipped");
        assert!(!check(user_keyword, FilterKind::UserKeyword, "tweetdeck|feature", &item));
        assert!(check(user_keyword, FilterKind::UserKeyword, "other|feature", &item));
        assert!(check(user_keyword, FilterKind::UserKeyword, "tweetdeck|bug", &item));
        assert!(check(user_keyword, FilterKind::UserKeyword, "tweetdeck", &item));
    }

    #[test]
    fn test_biography_and_avatars() {
        let user = Account::new("1", "a", "A")
            .with_description("Web3 Enthusiast")
            .with_avatar("https://abs.twimg.com/sticky/default_profile_images/x.png")
            .with_nft_avatar(true);
        let item = item_by(user, "");

        assert!(!check(user_biography, FilterKind::UserBiography, "web3", &item));
        assert!(check(user_biography, FilterKind::UserBiography, "gardening", &item));
        assert!(!check(default_avatar, FilterKind::DefaultAvatar, "", &item));
        assert!(!check(nft_avatar, FilterKind::NftAvatar, "", &item));

        let plain = item_by(
            Account::new("2", "b", "B")
                .with_avatar("https://pbs.twimg.com/me.jpg")
                .with_nft_avatar(false),
            "",
        );
        assert!(check(default_avatar, FilterKind::DefaultAvatar, "", &plain));
        assert!(check(nft_avatar, FilterKind::NftAvatar, "", &plain));

        let unknown = item_by(Account::new("3", "c", "C"), "");
        assert!(check(nft_avatar, FilterKind::NftAvatar, "", &unknown));
    }

    #[test]
    fn test_retweet_and_quote_from() {
        let original = FeedItem::new("1", "x", Account::new("9", "orig", "O"));
        let rt = item_by(Account::new("2", "Retweeter", "R"), "").retweeting(original);
        assert!(!check(retweet_from, FilterKind::RetweetFrom, "retweeter", &rt));
        assert!(check(retweet_from, FilterKind::RetweetFrom, "someone", &rt));

        let plain = item_by(Account::new("2", "retweeter", "R"), "");
        assert!(check(retweet_from, FilterKind::RetweetFrom, "retweeter", &plain));

        let quote =
            item_by(Account::new("3", "quoter", "Q"), "").quoting(Account::new("9", "o", "O"));
        assert!(!check(quote_from, FilterKind::QuoteFrom, "Quoter", &quote));
        assert!(check(quote_from, FilterKind::QuoteFrom, "quoter", &plain));
    }

    #[test]
    fn test_specific_item() {
        let item = item_by(Account::new("1", "a", "A"), "");
        assert!(!check(specific_item, FilterKind::SpecificItem, "100", &item));
        assert!(check(specific_item, FilterKind::SpecificItem, "101", &item));
    }

    #[test]
    fn test_missing_author_fails_open() {
        let orphan = FeedItem {
            id: "1".to_string(),
            text: "spam".to_string(),
            ..FeedItem::default()
        };
        let user_predicates: [(Predicate, FilterKind, &str); 10] = [
            (display_name_regex, FilterKind::DisplayNameRegex, "."),
            (handle_regex, FilterKind::HandleRegex, "."),
            (user_keyword, FilterKind::UserKeyword, "a|spam"),
            (user_biography, FilterKind::UserBiography, ""),
            (default_avatar, FilterKind::DefaultAvatar, ""),
            (nft_avatar, FilterKind::NftAvatar, ""),
            (follower_count_below, FilterKind::FollowerCountBelow, "100"),
            (follower_count_above, FilterKind::FollowerCountAbove, "-1"),
            (retweet_from, FilterKind::RetweetFrom, "a"),
            (quote_from, FilterKind::QuoteFrom, "a"),
        ];
        for (predicate, kind, value) in user_predicates {
            assert!(check(predicate, kind, value, &orphan), "{kind} should fail open");
        }
    }
}

//! Resolves the identity a user-scoped filter is about.

use crate::models::{Account, FeedItem, Subject};

/// Returns the account a catch on `item` should be attributed to.
///
/// Precedence: retweeted status author, source or quoted user, direct
/// author, followed account, list owner.
#[must_use]
pub fn meaningful_account(item: &FeedItem) -> Option<&Account> {
    item.retweeted_status
        .as_ref()
        .and_then(|original| original.user.as_ref())
        .or(item.source_user.as_ref())
        .or(item.user.as_ref())
        .or(item.following.as_ref())
        .or(item.owner.as_ref())
}

/// Projects the meaningful account of `item` into a [`Subject`].
///
/// `None` means the item is not loggable, not that resolution failed.
#[must_use]
pub fn resolve(item: &FeedItem) -> Option<Subject> {
    meaningful_account(item).map(Subject::from)
}

//! Read-only projections of the host's feed items.

use serde::{Deserialize, Serialize};

/// An account as seen by the host client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub id: String,
    /// Handle, without the leading `@`.
    pub screen_name: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(rename = "profileImageURL")]
    pub profile_image_url: String,
    /// Biography.
    #[serde(default)]
    pub description: String,
    /// Follower count.
    #[serde(default)]
    pub followers_count: u64,
    /// Whether the avatar is an NFT; `None` when the host did not report it.
    #[serde(default)]
    pub has_nft_avatar: Option<bool>,
}

impl Account {
    /// Creates an account with the identity fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        screen_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            screen_name: screen_name.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the follower count.
    #[must_use]
    pub const fn with_followers(mut self, count: u64) -> Self {
        self.followers_count = count;
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = url.into();
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the NFT avatar flag.
    #[must_use]
    pub const fn with_nft_avatar(mut self, has_nft_avatar: bool) -> Self {
        self.has_nft_avatar = Some(has_nft_avatar);
        self
    }

    /// Returns the handle lower-cased, the form filter values are compared to.
    #[must_use]
    pub fn normalized_handle(&self) -> String {
        self.screen_name.to_lowercase()
    }
}

/// A feed item under evaluation.
///
/// Items are owned by the host; the engine only reads them. Depending on the
/// column an item can be a status, a follow notification, or a list event,
/// so every related identity is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Item identifier.
    pub id: String,
    /// Text used for content filters.
    #[serde(default)]
    pub text: String,
    /// Direct author.
    #[serde(default)]
    pub user: Option<Account>,
    /// Retweeted status, when this item is a retweet.
    #[serde(default)]
    pub retweeted_status: Option<Box<FeedItem>>,
    /// Source or quoted user of an activity.
    #[serde(default)]
    pub source_user: Option<Account>,
    /// Account followed, for follow activities.
    #[serde(default)]
    pub following: Option<Account>,
    /// List owner, for list activities.
    #[serde(default)]
    pub owner: Option<Account>,
    /// Whether the item is a retweet.
    #[serde(default)]
    pub is_retweet: bool,
    /// Whether the item quotes another status.
    #[serde(default)]
    pub is_quote: bool,
    /// Name of the client the item was posted from.
    #[serde(default)]
    pub source: Option<String>,
}

impl FeedItem {
    /// Creates an item with an id, text and author.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, user: Account) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            user: Some(user),
            ..Self::default()
        }
    }

    /// Marks the item as a retweet of `original`.
    #[must_use]
    pub fn retweeting(mut self, original: Self) -> Self {
        self.is_retweet = true;
        self.retweeted_status = Some(Box::new(original));
        self
    }

    /// Marks the item as quoting `quoted`.
    #[must_use]
    pub fn quoting(mut self, quoted: Account) -> Self {
        self.is_quote = true;
        self.source_user = Some(quoted);
        self
    }

    /// Sets the posting client.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the text content filters are matched against.
    ///
    /// Includes the retweeted status text so a retweet of a muted phrase is
    /// muted too.
    #[must_use]
    pub fn filterable_text(&self) -> String {
        let mut parts = vec![self.text.as_str()];
        if let Some(original) = &self.retweeted_status
            && original.text != self.text
        {
            parts.push(original.text.as_str());
        }
        parts.retain(|part| !part.is_empty());
        parts.join(" ")
    }

    /// Returns the author's handle, if the item has an author.
    #[must_use]
    pub fn author_handle(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.screen_name.as_str())
    }
}

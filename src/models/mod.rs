//! Data models.
//!
//! Types shared by the registry, the catch store and the evaluation
//! pipeline:
//!
//! | Type | Role |
//! |------|------|
//! | [`FilterKind`] | Closed enumeration of filter kinds and their wire ids |
//! | [`Filter`] | A user-configured `(kind, value)` rule with an id |
//! | [`FeedItem`] / [`Account`] | Read-only view of a host item |
//! | [`Subject`] | Identity a catch is attributed to |
//! | [`CatchRecord`] | Persisted match record |

mod catch;
mod filter;
mod item;

pub use catch::{CatchRecord, Subject};
pub use filter::{CatchScope, Filter, FilterId, FilterKind};
pub use item::{Account, FeedItem};

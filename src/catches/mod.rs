//! Catch tracking.
//!
//! A *catch* records that a feed item was suppressed by a filter, attributed
//! to the identity the filter is about. Catches are keyed by
//! [`CatchKey`] so repeated evaluations of the same match collapse into one
//! entry, and grouped by [`MuteReasonKey`] for the "why was this muted" view.

mod key;
mod store;

pub use key::{
    CatchKey, DecodedCatchKey, KEY_SEPARATOR, MuteReasonKey, percent_decode, percent_encode,
};
pub use store::{CatchStore, DEFAULT_STORAGE_KEY};

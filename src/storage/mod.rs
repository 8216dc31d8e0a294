//! Preference storage.
//!
//! The host's key-value preference store is modelled by the
//! [`PreferenceStore`] trait. Two implementations ship with the crate:
//!
//! | Store | Use |
//! |-------|-----|
//! | [`MemoryPreferences`] | Tests, hosts that persist on their own |
//! | [`FilePreferences`] | A single JSON object file on disk |

mod filesystem;
mod memory;
mod traits;

pub use filesystem::FilePreferences;
pub use memory::MemoryPreferences;
pub use traits::PreferenceStore;

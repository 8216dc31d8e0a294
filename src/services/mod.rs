//! Business logic services.
//!
//! | Service | Purpose |
//! |---------|---------|
//! | [`MuteEngine`] | Evaluates filters and reconciles the catch store |
//! | [`NativeFilters`] | Host collaborator for passthrough filter kinds |

mod evaluation;
mod native;

pub use evaluation::{MuteEngine, ReconcileOutcome};
pub use native::{BasicNativeFilters, NativeFilters};

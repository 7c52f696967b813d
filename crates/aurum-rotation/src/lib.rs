//! Daily post-rotation tracker.
//!
//! Owns the persisted [`RotationState`] and decides, once per invocation,
//! whether a post may be sent today and which (category, asset, variant,
//! effect) combination to use. All decision logic is pure and in-memory;
//! I/O is confined to [`state::RotationState::load`]/[`state::RotationState::save`]
//! and the advisory lock in [`lock`].
//!
//! The caller's contract is strict ordering: acquire lock → load → decide →
//! (external side effect) → record → save, within one process invocation.

pub mod lock;
pub mod quota;
pub mod selection;
pub mod state;

pub use lock::StateLock;
pub use quota::{QuotaPolicy, local_date, should_post_today};
pub use selection::{SelectionCatalog, SelectionCategory, choose_combination};
pub use state::RotationState;

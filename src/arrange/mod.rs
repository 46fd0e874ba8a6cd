//! Arrangement engine: laying out a zone's members.
//!
//! Arranging a zone is two steps:
//!
//! 1. `compute_layout` turns the zone's bounds and member count into one
//!    target position per member (even spacing along the long side,
//!    centered, spacing capped).
//! 2. The `Animator` records a `Relocation` from each card's current
//!    position to its target. Relocations are advanced by the table's
//!    per-frame tick; re-arranging mid-flight simply starts a new move
//!    from wherever the card currently is.

mod layout;
mod animator;

pub use layout::{compute_layout, spacing_for};
pub use animator::{Animator, Relocation};

//! The table: zones, cards, drag and physics wired together.
//!
//! `SpatialEngine` owns one instance of every subsystem for the lifetime
//! of a game table and is the only place they meet. Every membership
//! change it makes is followed by a re-arrangement of the zones involved
//! and a `TableEvent` for the renderer.
//!
//! ## Key Types
//!
//! - `SpatialEngine`: the per-table engine
//! - `CardEntity`: a card on the table and its physics body
//! - `TableEvent`, `TableSnapshot`: what the renderer sees

mod card;
mod engine;
mod events;

pub use card::{CardEntity, CardState};
pub use engine::SpatialEngine;
pub use events::{TableEvent, TableSnapshot};

//! Zone system for card placement on the table.
//!
//! Zones are **table-configured**, not hardcoded. A table defines its zones
//! (hand, battlefield, deck, discard, ...) via `ZoneConfig` at startup.
//!
//! ## Key Types
//!
//! - `ZoneRegistry`: zone definitions, lookup by name or by position
//! - `Zone`: bounds, drop policy, capacity and ordered members
//! - `MembershipTracker`: the single point where membership changes
//! - `MembershipChange`: which zones one membership call touched

pub mod registry;
pub mod membership;

pub use registry::{Zone, ZoneRegistry};
pub use membership::{MembershipChange, MembershipTracker};

// Re-export zone types from core for convenience
pub use crate::core::config::{Seat, ZoneConfig, ZoneKind};
pub use crate::core::entity::ZoneId;

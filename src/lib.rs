//! # ccg-table
//!
//! Spatial and zone engine for a 3D card-game table.
//!
//! Cards are physics bodies resting on a table divided into named,
//! box-shaped zones (hand, battlefield, deck, ...). The engine keeps track
//! of which zone each card belongs to, lays out the members of a zone,
//! lets the user pick up and drop one card at a time, and turns physics
//! contacts into zone membership.
//!
//! ## Design Principles
//!
//! 1. **One Owner Per Fact**: A card's zone lives in the membership
//!    tracker and nowhere else. Zones only list their members in order.
//!
//! 2. **Configuration Over Convention**: Tables define their zones via
//!    `TableConfig` and `ZoneConfig`; the standard two-seat layout is just
//!    one preset.
//!
//! 3. **Physics Behind A Trait**: The engine never simulates. It talks to
//!    a `PhysicsProvider`, so it runs headless in tests and on a server.
//!
//! ## Modules
//!
//! - `core`: Identifiers, geometry, configuration, errors
//! - `zones`: Zone registry and membership tracking
//! - `arrange`: Zone layout and card relocation
//! - `drag`: The drag state machine
//! - `physics`: Physics provider interface and a headless provider
//! - `bridge`: Physics contacts to zone membership
//! - `table`: The engine that ties them together

pub mod core;
pub mod zones;
pub mod arrange;
pub mod drag;
pub mod physics;
pub mod bridge;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Aabb, ArrangementConfig, CardId, DefinitionId, DragConfig, FormFactor, Seat, SpatialError,
    SpatialResult, TableConfig, TableLayout, ZoneConfig, ZoneId, ZoneKind,
};

pub use crate::zones::{MembershipChange, MembershipTracker, Zone, ZoneRegistry};

pub use crate::arrange::{compute_layout, Animator, Relocation};

pub use crate::drag::{DragController, DragSession, DragState, DropOutcome, DropResolution};

pub use crate::physics::{BodyHandle, Contact, HeadlessPhysics, PhysicsProvider};

pub use crate::bridge::{CollisionBridge, CollisionEvent, CollisionOutcome};

pub use crate::table::{CardEntity, CardState, SpatialEngine, TableEvent, TableSnapshot};

//! Core table types: identifiers, geometry, configuration, errors.
//!
//! This module contains the building blocks shared by every subsystem.
//! Tables configure these via `TableConfig` rather than modifying the core.

pub mod entity;
pub mod geometry;
pub mod config;
pub mod error;

pub use entity::{CardId, DefinitionId, ZoneId};
pub use geometry::{Aabb, Axis};
pub use config::{
    ArrangementConfig, DragConfig, FormFactor, LayoutSlot, NormalizedRect, Seat, TableConfig,
    TableLayout, ZoneConfig, ZoneKind,
};
pub use error::{SpatialError, SpatialResult};

//! Card entities on the table.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::entity::{CardId, DefinitionId, ZoneId};
use crate::physics::BodyHandle;

/// A card instance present on the table.
///
/// Zone membership is not stored here; the membership tracker owns it and
/// the table answers `card_zone` from there, so the two can never disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct CardEntity {
    pub id: CardId,
    pub definition: DefinitionId,

    /// World position as last written by a drag, relocation or physics.
    pub position: Vec3,

    /// Physics body owned by the table for the card's lifetime.
    pub body: BodyHandle,

    /// Locked cards can't be picked up.
    pub locked: bool,
}

impl CardEntity {
    #[must_use]
    pub fn new(id: CardId, definition: DefinitionId, position: Vec3, body: BodyHandle) -> Self {
        Self {
            id,
            definition,
            position,
            body,
            locked: false,
        }
    }
}

/// Per-card state published to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    pub card: CardId,
    pub definition: DefinitionId,
    pub position: Vec3,
    pub zone: Option<ZoneId>,
    pub locked: bool,
    pub moving: bool,
}

//! Notifications for the rendering layer.
//!
//! The table pushes a `TableEvent` for every visible change; the renderer
//! drains them once per frame. `TableSnapshot` is the polling alternative.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::entity::{CardId, ZoneId};
use crate::drag::DropOutcome;

use super::card::CardState;

/// Something that changed on the table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    CardSpawned {
        card: CardId,
        position: Vec3,
    },
    CardDespawned {
        card: CardId,
    },
    /// A card's zone membership changed.
    ZoneChanged {
        card: CardId,
        from: Option<ZoneId>,
        to: Option<ZoneId>,
    },
    /// A zone's layout was recomputed.
    ZoneArranged {
        zone: ZoneId,
        members: usize,
    },
    DragStarted {
        card: CardId,
        origin: Option<ZoneId>,
    },
    /// The zone under the dragged card changed.
    HoverChanged {
        card: CardId,
        zone: Option<ZoneId>,
        accepts: bool,
    },
    DragEnded {
        outcome: DropOutcome,
    },
}

/// Full table state at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Engine clock in seconds.
    pub time: f32,
    /// Every card, sorted by id.
    pub cards: Vec<CardState>,
    pub dragging: Option<CardId>,
}

impl TableSnapshot {
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&CardState> {
        self.cards
            .binary_search_by_key(&card, |state| state.card)
            .ok()
            .map(|index| &self.cards[index])
    }
}

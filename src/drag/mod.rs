//! Drag life-cycle.
//!
//! At most one card is dragged at a time. The `DragController` only holds
//! the state machine (`Idle` -> `Dragging` -> `Idle`); the table drives it
//! and does the membership and physics work around each transition.
//!
//! ## Key Types
//!
//! - `DragController`: the global drag state
//! - `DragSession`: the card being dragged and what it came from
//! - `DropOutcome`: where a released card ended up, and why

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::entity::{CardId, ZoneId};
use crate::core::error::{SpatialError, SpatialResult};

/// State of one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// The card under the pointer.
    pub card: CardId,

    /// Zone the card was in when the drag started.
    pub origin: Option<ZoneId>,

    /// Latest pointer position, already lifted to drag height.
    pub target: Vec3,

    /// Zone currently under the card.
    pub hover: Option<ZoneId>,

    /// Engine time at which the drag began.
    pub started_at: f32,
}

/// Global drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// How a released card's zone was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropResolution {
    /// Dropped on an accepting zone with room.
    Target,
    /// Nothing under the card could take it; sent to the fallback zone.
    Fallback,
    /// The fallback zone was full too; returned to where it came from.
    Origin,
    /// No zone could take it. The card is on the table with no zone.
    Stranded,
}

/// Result of `end_drag`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutcome {
    pub card: CardId,
    pub zone: Option<ZoneId>,
    pub resolution: DropResolution,
}

/// Move `current` a fraction `smoothing` of the way to `target`.
#[must_use]
pub fn smooth_toward(current: Vec3, target: Vec3, smoothing: f32) -> Vec3 {
    current.lerp(target, smoothing.clamp(0.0, 1.0))
}

/// The single drag state machine for a table.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut DragSession> {
        match &mut self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// The card being dragged, if any.
    #[must_use]
    pub fn active_card(&self) -> Option<CardId> {
        self.session().map(|s| s.card)
    }

    #[must_use]
    pub fn is_dragging(&self, card: CardId) -> bool {
        self.active_card() == Some(card)
    }

    /// Start a session. Fails if one is already active, leaving it as is.
    pub fn begin(
        &mut self,
        card: CardId,
        origin: Option<ZoneId>,
        target: Vec3,
        now: f32,
    ) -> SpatialResult<DragSession> {
        if let Some(active) = self.active_card() {
            return Err(SpatialError::AlreadyDragging { active });
        }
        let session = DragSession {
            card,
            origin,
            target,
            hover: None,
            started_at: now,
        };
        self.state = DragState::Dragging(session);
        Ok(session)
    }

    /// Record a new pointer target. Returns false when idle.
    pub fn set_target(&mut self, target: Vec3) -> bool {
        match self.session_mut() {
            Some(session) => {
                session.target = target;
                true
            }
            None => false,
        }
    }

    /// Record the zone under the card. Returns true if it changed.
    pub fn set_hover(&mut self, hover: Option<ZoneId>) -> bool {
        match self.session_mut() {
            Some(session) if session.hover != hover => {
                session.hover = hover;
                true
            }
            _ => false,
        }
    }

    /// End the session, returning it. `None` when idle.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

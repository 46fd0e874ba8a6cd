//! Error taxonomy for the spatial engine.
//!
//! Two families live here. Configuration mistakes (`DuplicateZone`,
//! `UnknownZone`, `InvalidConfig`, unknown or duplicate cards, use after
//! `TableClosed`) mean the caller has a bug and should fail loudly.
//! Contention (`ZoneFull`, `ZoneRejectsCards`, `AlreadyDragging`,
//! `CardLocked`) is ordinary play and callers handle it locally. Any operation that returns an error has
//! left the engine unchanged.

use thiserror::Error;

use super::entity::CardId;

/// Errors raised by the spatial engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpatialError {
    #[error("zone `{0}` is already defined")]
    DuplicateZone(String),

    #[error("no zone named `{0}`")]
    UnknownZone(String),

    #[error("zone `{0}` does not accept cards")]
    ZoneRejectsCards(String),

    #[error("zone `{zone}` is full ({capacity} cards)")]
    ZoneFull { zone: String, capacity: usize },

    #[error("{active} is already being dragged")]
    AlreadyDragging { active: CardId },

    #[error("{0} is locked and cannot be dragged")]
    CardLocked(CardId),

    #[error("{0} is not on the table")]
    UnknownCard(CardId),

    #[error("{0} is already on the table")]
    DuplicateCard(CardId),

    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),

    #[error("the table has been torn down")]
    TableClosed,
}

impl SpatialError {
    /// Is this an expected runtime condition rather than a caller bug?
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpatialError::ZoneFull { .. }
                | SpatialError::ZoneRejectsCards(_)
                | SpatialError::AlreadyDragging { .. }
                | SpatialError::CardLocked(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type SpatialResult<T> = Result<T, SpatialError>;

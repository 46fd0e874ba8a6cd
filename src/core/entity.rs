//! Identifiers for things on the table.
//!
//! A card on the table is identified by its **instance** id (`CardId`), not
//! by the id of the card it prints (`DefinitionId`). Two copies of the same
//! card share a `DefinitionId` but always have distinct `CardId`s.
//!
//! ## Usage
//!
//! ```
//! use ccg_table::core::{CardId, DefinitionId};
//!
//! let bolt = DefinitionId::new(7);
//! let first = CardId::new(1);
//! let second = CardId::new(2);
//!
//! assert_ne!(first, second);
//! assert_eq!(format!("{}", first), "Card(1)");
//! assert_eq!(bolt.raw(), 7);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier of a card definition (the printed card).
///
/// The spatial engine never interprets it; it is carried so that the
/// renderer and game rules can look up what a card instance is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefinitionId(pub u32);

impl DefinitionId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Definition({})", self.0)
    }
}

/// Zone identifier.
///
/// Assigned by the zone registry in registration order, so a zone's id is
/// also its position in the registry. Names are the public identity; ids
/// are the cheap handle used internally and in events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u16);

impl ZoneId {
    /// Create a new zone ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the registry's zone list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(CardId::from(42), id);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_zone_id_index() {
        let id = ZoneId::new(3);
        assert_eq!(id.index(), 3);
        assert_eq!(format!("{}", id), "Zone(3)");
    }

    #[test]
    fn test_definition_display() {
        assert_eq!(format!("{}", DefinitionId::new(9)), "Definition(9)");
    }

    #[test]
    fn test_serialization() {
        let id = CardId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

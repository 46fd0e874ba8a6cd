//! Card-to-zone membership tracking.
//!
//! The `MembershipTracker` is the only code that edits zone member lists.
//! It keeps a card -> zone index alongside the registry's ordered member
//! lists and guarantees that a card is listed in at most one zone.
//!
//! Each call reports what it changed as a `MembershipChange`, so the caller
//! can recompute the layout of exactly the zones that were touched.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::{CardId, ZoneId};
use crate::core::error::{SpatialError, SpatialResult};

use super::registry::ZoneRegistry;

/// The effect of one membership operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipChange {
    pub card: CardId,
    /// Zone the card left, if any.
    pub from: Option<ZoneId>,
    /// Zone the card entered, if any.
    pub to: Option<ZoneId>,
}

impl MembershipChange {
    /// Did anything actually change?
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// Zones whose member lists changed, source first. Never more than two.
    #[must_use]
    pub fn affected_zones(&self) -> SmallVec<[ZoneId; 2]> {
        let mut zones = SmallVec::new();
        if self.is_noop() {
            return zones;
        }
        zones.extend(self.from);
        zones.extend(self.to);
        zones
    }
}

/// Tracks which zone each card is in.
///
/// ## Usage
///
/// ```
/// use ccg_table::core::{CardId, ZoneConfig};
/// use ccg_table::zones::{MembershipTracker, ZoneRegistry};
/// use glam::Vec3;
///
/// let mut registry = ZoneRegistry::new();
/// let hand = registry.define_zone(ZoneConfig::new("hand", Vec3::ZERO, Vec3::ONE)).unwrap();
/// let mut tracker = MembershipTracker::new();
///
/// let change = tracker.assign(&mut registry, CardId(1), hand).unwrap();
/// assert_eq!(change.to, Some(hand));
/// assert_eq!(registry.members_of("hand").unwrap(), &[CardId(1)]);
///
/// tracker.release(&mut registry, CardId(1));
/// assert!(registry.members_of("hand").unwrap().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MembershipTracker {
    /// Card locations: card -> zone
    locations: FxHashMap<CardId, ZoneId>,
}

impl MembershipTracker {
    /// Create a new empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `card` in `zone`, taking it out of its current zone first.
    ///
    /// Admission is checked before anything moves, so a rejected assignment
    /// leaves the card where it was. Assigning a card to the zone it is
    /// already in succeeds without changing anything.
    pub fn assign(
        &mut self,
        registry: &mut ZoneRegistry,
        card: CardId,
        zone: ZoneId,
    ) -> SpatialResult<MembershipChange> {
        let current = self.locations.get(&card).copied();
        if current == Some(zone) {
            return Ok(MembershipChange {
                card,
                from: current,
                to: current,
            });
        }

        let target = registry
            .get(zone)
            .ok_or_else(|| SpatialError::UnknownZone(zone.to_string()))?;
        target.check_admission()?;

        if let Some(old) = current {
            if let Some(old_zone) = registry.get_mut(old) {
                old_zone.remove_member(card);
            }
        }
        if let Some(new_zone) = registry.get_mut(zone) {
            new_zone.push_member(card);
        }
        self.locations.insert(card, zone);

        Ok(MembershipChange {
            card,
            from: current,
            to: Some(zone),
        })
    }

    /// Take `card` out of its zone. A card with no zone is left alone.
    pub fn release(&mut self, registry: &mut ZoneRegistry, card: CardId) -> MembershipChange {
        let from = self.locations.remove(&card);
        if let Some(old) = from {
            if let Some(zone) = registry.get_mut(old) {
                zone.remove_member(card);
            }
        }
        MembershipChange { card, from, to: None }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<ZoneId> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: ZoneId) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Forget every placement and empty every member list.
    pub fn clear(&mut self, registry: &mut ZoneRegistry) {
        self.locations.clear();
        registry.clear_all_members();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ZoneConfig;
    use glam::Vec3;

    fn setup() -> (ZoneRegistry, ZoneId, ZoneId) {
        let mut registry = ZoneRegistry::new();
        let hand = registry
            .define_zone(
                ZoneConfig::new("hand", Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0))
                    .with_capacity(10),
            )
            .unwrap();
        let field = registry
            .define_zone(ZoneConfig::new("battlefield", Vec3::ZERO, Vec3::new(16.0, 1.0, 6.0)))
            .unwrap();
        (registry, hand, field)
    }

    #[test]
    fn test_assign_appends_in_arrival_order() {
        let (mut registry, hand, _) = setup();
        let mut tracker = MembershipTracker::new();

        tracker.assign(&mut registry, CardId(3), hand).unwrap();
        tracker.assign(&mut registry, CardId(1), hand).unwrap();
        tracker.assign(&mut registry, CardId(2), hand).unwrap();

        assert_eq!(registry.members_of("hand").unwrap(), &[CardId(3), CardId(1), CardId(2)]);
        assert!(tracker.is_in_zone(CardId(1), hand));
    }

    #[test]
    fn test_move_between_zones() {
        let (mut registry, hand, field) = setup();
        let mut tracker = MembershipTracker::new();

        tracker.assign(&mut registry, CardId(10), hand).unwrap();
        let change = tracker.assign(&mut registry, CardId(10), field).unwrap();

        assert_eq!(change.from, Some(hand));
        assert_eq!(change.to, Some(field));
        assert_eq!(change.affected_zones().as_slice(), &[hand, field]);
        assert!(registry.members_of("hand").unwrap().is_empty());
        assert_eq!(registry.members_of("battlefield").unwrap(), &[CardId(10)]);
        assert_eq!(tracker.zone_of(CardId(10)), Some(field));
    }

    #[test]
    fn test_same_zone_is_noop() {
        let (mut registry, hand, _) = setup();
        let mut tracker = MembershipTracker::new();

        tracker.assign(&mut registry, CardId(1), hand).unwrap();
        tracker.assign(&mut registry, CardId(2), hand).unwrap();
        let change = tracker.assign(&mut registry, CardId(1), hand).unwrap();

        assert!(change.is_noop());
        assert!(change.affected_zones().is_empty());
        assert_eq!(registry.members_of("hand").unwrap(), &[CardId(1), CardId(2)]);
    }

    #[test]
    fn test_full_zone_leaves_card_in_place() {
        let mut registry = ZoneRegistry::new();
        let slot = registry
            .define_zone(ZoneConfig::new("slot", Vec3::ZERO, Vec3::ONE).with_capacity(1))
            .unwrap();
        let other = registry
            .define_zone(ZoneConfig::new("other", Vec3::new(5.0, 0.0, 0.0), Vec3::ONE))
            .unwrap();
        let mut tracker = MembershipTracker::new();

        tracker.assign(&mut registry, CardId(1), slot).unwrap();
        tracker.assign(&mut registry, CardId(2), other).unwrap();

        let err = tracker.assign(&mut registry, CardId(2), slot).unwrap_err();
        assert!(matches!(err, SpatialError::ZoneFull { capacity: 1, .. }));
        assert_eq!(registry.members_of("slot").unwrap(), &[CardId(1)]);
        assert_eq!(registry.members_of("other").unwrap(), &[CardId(2)]);
        assert_eq!(tracker.zone_of(CardId(2)), Some(other));
    }

    #[test]
    fn test_rejecting_zone() {
        let mut registry = ZoneRegistry::new();
        let deck = registry
            .define_zone(ZoneConfig::new("deck", Vec3::ZERO, Vec3::ONE).rejecting())
            .unwrap();
        let mut tracker = MembershipTracker::new();

        let err = tracker.assign(&mut registry, CardId(1), deck).unwrap_err();
        assert_eq!(err, SpatialError::ZoneRejectsCards("deck".into()));
        assert_eq!(tracker.zone_of(CardId(1)), None);
    }

    #[test]
    fn test_release_twice() {
        let (mut registry, hand, _) = setup();
        let mut tracker = MembershipTracker::new();

        tracker.assign(&mut registry, CardId(1), hand).unwrap();

        let first = tracker.release(&mut registry, CardId(1));
        assert_eq!(first.from, Some(hand));
        assert_eq!(first.affected_zones().as_slice(), &[hand]);

        let second = tracker.release(&mut registry, CardId(1));
        assert!(second.is_noop());
        assert!(second.affected_zones().is_empty());
        assert!(registry.members_of("hand").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_zone_id() {
        let (mut registry, _, _) = setup();
        let mut tracker = MembershipTracker::new();
        assert!(matches!(
            tracker.assign(&mut registry, CardId(1), ZoneId::new(99)),
            Err(SpatialError::UnknownZone(_))
        ));
    }

    #[test]
    fn test_clear() {
        let (mut registry, hand, field) = setup();
        let mut tracker = MembershipTracker::new();
        tracker.assign(&mut registry, CardId(1), hand).unwrap();
        tracker.assign(&mut registry, CardId(2), field).unwrap();

        tracker.clear(&mut registry);

        assert_eq!(tracker.zone_of(CardId(1)), None);
        assert_eq!(tracker.zone_of(CardId(2)), None);
        assert!(registry.iter().all(|z| z.is_empty()));
    }
}

//! Zone registry: zone definitions and lookup.
//!
//! Zones are registered once when the table is built. After that their
//! bounds and policy never change; only their member lists do, and only
//! through the `MembershipTracker`.

use glam::Vec3;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::core::config::{Seat, ZoneConfig, ZoneKind};
use crate::core::entity::{CardId, ZoneId};
use crate::core::error::{SpatialError, SpatialResult};
use crate::core::geometry::Aabb;

/// A registered zone.
#[derive(Clone, Debug)]
pub struct Zone {
    id: ZoneId,
    name: String,
    bounds: Aabb,
    accepts_cards: bool,
    capacity: Option<usize>,
    kind: Option<ZoneKind>,
    owner: Option<Seat>,

    /// Members in arrival order, which is also arrangement order.
    members: Vec<CardId>,
}

impl Zone {
    fn from_config(id: ZoneId, config: ZoneConfig) -> Self {
        Self {
            id,
            name: config.name,
            bounds: config.bounds,
            accepts_cards: config.accepts_cards,
            capacity: config.capacity,
            kind: config.kind,
            owner: config.owner,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    #[must_use]
    pub fn accepts_cards(&self) -> bool {
        self.accepts_cards
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[must_use]
    pub fn kind(&self) -> Option<ZoneKind> {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }

    /// Members in arrangement order.
    #[must_use]
    pub fn members(&self) -> &[CardId] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.members.contains(&card)
    }

    /// Has the zone reached its capacity?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.members.len() >= cap)
    }

    /// Would this zone take one more card right now?
    #[must_use]
    pub fn can_accept(&self) -> bool {
        self.check_admission().is_ok()
    }

    /// Check the drop policy and capacity for one more card.
    ///
    /// Every way into a zone (drop, collision, direct assignment) is
    /// judged by this check.
    pub fn check_admission(&self) -> SpatialResult<()> {
        if !self.accepts_cards {
            return Err(SpatialError::ZoneRejectsCards(self.name.clone()));
        }
        if let Some(capacity) = self.capacity {
            if self.members.len() >= capacity {
                return Err(SpatialError::ZoneFull {
                    zone: self.name.clone(),
                    capacity,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn push_member(&mut self, card: CardId) {
        debug_assert!(!self.members.contains(&card), "{card} already in {}", self.name);
        self.members.push(card);
    }

    /// Returns true if the card was a member.
    pub(crate) fn remove_member(&mut self, card: CardId) -> bool {
        let before = self.members.len();
        self.members.retain(|&c| c != card);
        self.members.len() != before
    }

    pub(crate) fn clear_members(&mut self) {
        self.members.clear();
    }
}

/// Registry of all zones on the table.
///
/// ## Example
///
/// ```
/// use ccg_table::core::ZoneConfig;
/// use ccg_table::zones::ZoneRegistry;
/// use glam::Vec3;
///
/// let mut registry = ZoneRegistry::new();
/// registry
///     .define_zone(ZoneConfig::new("hand", Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0)))
///     .unwrap();
///
/// let hand = registry.zone_at(Vec3::new(2.0, 0.0, 6.5)).unwrap();
/// assert_eq!(hand.name(), "hand");
/// assert!(registry.zone_at(Vec3::new(0.0, 0.0, -6.0)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneRegistry {
    /// Zones in registration order; `ZoneId` indexes this list.
    zones: Vec<Zone>,
    by_name: FxHashMap<String, ZoneId>,
}

impl ZoneRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone.
    ///
    /// Fails with `DuplicateZone` if the name is taken; existing zones are
    /// left as they were. Overlapping footprints are allowed but logged,
    /// since the first registered zone will shadow the later one.
    pub fn define_zone(&mut self, config: ZoneConfig) -> SpatialResult<ZoneId> {
        if self.by_name.contains_key(&config.name) {
            return Err(SpatialError::DuplicateZone(config.name));
        }
        let raw = u16::try_from(self.zones.len())
            .map_err(|_| SpatialError::InvalidConfig("too many zones".into()))?;
        let id = ZoneId::new(raw);

        for existing in &self.zones {
            if existing.bounds.overlaps_footprint(&config.bounds) {
                warn!(
                    zone = %config.name,
                    shadowed_by = %existing.name,
                    "zone overlaps an earlier zone; the earlier zone wins lookups"
                );
            }
        }

        debug!(
            zone = %config.name,
            %id,
            accepts = config.accepts_cards,
            capacity = ?config.capacity,
            "zone defined"
        );
        self.by_name.insert(config.name.clone(), id);
        self.zones.push(Zone::from_config(id, config));
        Ok(id)
    }

    /// The zone whose footprint contains `position`, if any.
    ///
    /// When zones overlap, the first registered one wins.
    #[must_use]
    pub fn zone_at(&self, position: Vec3) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|zone| zone.bounds.contains_footprint(position))
    }

    /// Look up a zone by name.
    pub fn zone_named(&self, name: &str) -> SpatialResult<&Zone> {
        self.id_of(name).map(|id| &self.zones[id.index()])
    }

    /// Resolve a zone name to its id.
    pub fn id_of(&self, name: &str) -> SpatialResult<ZoneId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SpatialError::UnknownZone(name.to_string()))
    }

    /// Ordered member list of a named zone.
    pub fn members_of(&self, name: &str) -> SpatialResult<&[CardId]> {
        self.zone_named(name).map(Zone::members)
    }

    /// Get a zone by id.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(id.index())
    }

    /// Iterate over zones in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub(crate) fn clear_all_members(&mut self) {
        for zone in &mut self.zones {
            zone.clear_members();
        }
    }

    /// Drop every zone. Only the table does this, together with its tracker.
    pub(crate) fn clear(&mut self) {
        self.zones.clear();
        self.by_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> ZoneConfig {
        ZoneConfig::new("hand", Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0))
            .with_capacity(10)
    }

    fn battlefield() -> ZoneConfig {
        ZoneConfig::new("battlefield", Vec3::ZERO, Vec3::new(16.0, 1.0, 6.0))
    }

    #[test]
    fn test_define_and_lookup() {
        let mut registry = ZoneRegistry::new();
        let hand_id = registry.define_zone(hand()).unwrap();
        let field_id = registry.define_zone(battlefield()).unwrap();

        assert_eq!(hand_id, ZoneId::new(0));
        assert_eq!(field_id, ZoneId::new(1));
        assert_eq!(registry.len(), 2);

        let zone = registry.zone_named("hand").unwrap();
        assert_eq!(zone.id(), hand_id);
        assert_eq!(zone.capacity(), Some(10));
        assert!(zone.accepts_cards());
    }

    #[test]
    fn test_duplicate_zone() {
        let mut registry = ZoneRegistry::new();
        registry.define_zone(hand()).unwrap();

        let err = registry.define_zone(hand().rejecting()).unwrap_err();
        assert_eq!(err, SpatialError::DuplicateZone("hand".into()));

        // Original definition untouched
        assert!(registry.zone_named("hand").unwrap().accepts_cards());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_zone() {
        let registry = ZoneRegistry::new();
        assert_eq!(
            registry.zone_named("graveyard").unwrap_err(),
            SpatialError::UnknownZone("graveyard".into())
        );
        assert!(registry.members_of("graveyard").is_err());
    }

    #[test]
    fn test_zone_at() {
        let mut registry = ZoneRegistry::new();
        registry.define_zone(hand()).unwrap();
        registry.define_zone(battlefield()).unwrap();

        assert_eq!(registry.zone_at(Vec3::new(5.0, 0.0, 7.0)).unwrap().name(), "hand");
        assert_eq!(registry.zone_at(Vec3::new(-7.0, 0.6, 1.0)).unwrap().name(), "battlefield");
        assert!(registry.zone_at(Vec3::new(0.0, 0.0, -20.0)).is_none());
    }

    #[test]
    fn test_overlap_first_registered_wins() {
        let mut registry = ZoneRegistry::new();
        registry
            .define_zone(ZoneConfig::new("a", Vec3::ZERO, Vec3::new(4.0, 1.0, 4.0)))
            .unwrap();
        registry
            .define_zone(ZoneConfig::new("b", Vec3::new(1.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 4.0)))
            .unwrap();

        assert_eq!(registry.zone_at(Vec3::new(1.5, 0.0, 0.0)).unwrap().name(), "a");
        assert_eq!(registry.zone_at(Vec3::new(2.5, 0.0, 0.0)).unwrap().name(), "b");
    }

    #[test]
    fn test_admission() {
        let mut registry = ZoneRegistry::new();
        let id = registry
            .define_zone(ZoneConfig::new("slot", Vec3::ZERO, Vec3::ONE).with_capacity(1))
            .unwrap();
        let rejecting = registry
            .define_zone(ZoneConfig::new("deck", Vec3::new(5.0, 0.0, 0.0), Vec3::ONE).rejecting())
            .unwrap();

        assert!(registry.get(id).unwrap().check_admission().is_ok());
        registry.get_mut(id).unwrap().push_member(CardId(1));
        assert!(registry.get(id).unwrap().is_full());
        assert_eq!(
            registry.get(id).unwrap().check_admission(),
            Err(SpatialError::ZoneFull {
                zone: "slot".into(),
                capacity: 1
            })
        );
        assert_eq!(
            registry.get(rejecting).unwrap().check_admission(),
            Err(SpatialError::ZoneRejectsCards("deck".into()))
        );
    }

    #[test]
    fn test_clear() {
        let mut registry = ZoneRegistry::new();
        registry.define_zone(hand()).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.zone_named("hand").is_err());
    }
}

//! Collision bridge: physics contacts to zone membership.
//!
//! The physics provider reports contacts between opaque bodies. At the
//! boundary the bridge turns a contact into a typed `CollisionEvent`
//! (which card touched which zone) and discards anything else, such as
//! card-on-card or zone-on-zone contacts.
//!
//! An event then goes through `absorb`, which assigns the card to the zone
//! unless the card is being dragged. A full or rejecting zone simply does
//! not take the card. The table also holds back cards that are still
//! travelling to their arranged spot, since they cross other zones on the
//! way.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::entity::{CardId, ZoneId};
use crate::core::error::SpatialError;
use crate::physics::{BodyHandle, Contact};
use crate::zones::{MembershipChange, MembershipTracker, ZoneRegistry};

/// A card body touching a zone's trigger volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub card: CardId,
    pub zone: ZoneId,
}

/// What a collision did to membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The card moved into the zone.
    Absorbed(MembershipChange),
    /// The card was already in the zone.
    AlreadyMember,
    /// The card is being dragged; the drag decides its zone.
    IgnoredWhileDragged,
    /// The card is on its way to an arranged position in its own zone.
    IgnoredWhileRelocating,
    /// The zone is full or does not accept cards.
    Refused(SpatialError),
}

/// Maps physics bodies back to cards and zones.
#[derive(Clone, Debug, Default)]
pub struct CollisionBridge {
    cards: FxHashMap<BodyHandle, CardId>,
    zones: FxHashMap<BodyHandle, ZoneId>,
}

impl CollisionBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_card(&mut self, body: BodyHandle, card: CardId) {
        self.cards.insert(body, card);
    }

    pub fn register_zone(&mut self, body: BodyHandle, zone: ZoneId) {
        self.zones.insert(body, zone);
    }

    pub fn unregister(&mut self, body: BodyHandle) {
        self.cards.remove(&body);
        self.zones.remove(&body);
    }

    /// Trigger volume bodies, for teardown.
    pub fn zone_bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.zones.keys().copied()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.zones.clear();
    }

    /// Turn a raw contact into a card/zone event, if it is one.
    #[must_use]
    pub fn resolve(&self, contact: Contact) -> Option<CollisionEvent> {
        let pair = |card_body: BodyHandle, zone_body: BodyHandle| {
            Some(CollisionEvent {
                card: *self.cards.get(&card_body)?,
                zone: *self.zones.get(&zone_body)?,
            })
        };
        pair(contact.a, contact.b).or_else(|| pair(contact.b, contact.a))
    }
}

/// Apply a collision to membership.
///
/// `dragged` is the card under user control, which collisions never move.
pub fn absorb(
    tracker: &mut MembershipTracker,
    registry: &mut ZoneRegistry,
    event: CollisionEvent,
    dragged: Option<CardId>,
) -> CollisionOutcome {
    if dragged == Some(event.card) {
        trace!(card = %event.card, zone = %event.zone, "collision ignored during drag");
        return CollisionOutcome::IgnoredWhileDragged;
    }
    if tracker.is_in_zone(event.card, event.zone) {
        return CollisionOutcome::AlreadyMember;
    }
    match tracker.assign(registry, event.card, event.zone) {
        Ok(change) => CollisionOutcome::Absorbed(change),
        Err(err) => {
            trace!(card = %event.card, zone = %event.zone, %err, "collision refused");
            CollisionOutcome::Refused(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ZoneConfig;
    use glam::Vec3;

    #[test]
    fn test_resolve_either_order() {
        let mut bridge = CollisionBridge::new();
        bridge.register_card(BodyHandle(1), CardId(10));
        bridge.register_zone(BodyHandle(2), ZoneId(0));

        let expected = Some(CollisionEvent {
            card: CardId(10),
            zone: ZoneId(0),
        });
        assert_eq!(bridge.resolve(Contact::new(BodyHandle(1), BodyHandle(2))), expected);
        assert_eq!(bridge.resolve(Contact::new(BodyHandle(2), BodyHandle(1))), expected);
    }

    #[test]
    fn test_resolve_ignores_other_pairs() {
        let mut bridge = CollisionBridge::new();
        bridge.register_card(BodyHandle(1), CardId(10));
        bridge.register_card(BodyHandle(3), CardId(11));
        bridge.register_zone(BodyHandle(2), ZoneId(0));
        bridge.register_zone(BodyHandle(4), ZoneId(1));

        assert_eq!(bridge.resolve(Contact::new(BodyHandle(1), BodyHandle(3))), None);
        assert_eq!(bridge.resolve(Contact::new(BodyHandle(2), BodyHandle(4))), None);
        assert_eq!(bridge.resolve(Contact::new(BodyHandle(1), BodyHandle(99))), None);

        bridge.unregister(BodyHandle(1));
        assert_eq!(bridge.resolve(Contact::new(BodyHandle(1), BodyHandle(2))), None);
    }

    fn registry() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        registry
            .define_zone(
                ZoneConfig::new("battlefield", Vec3::ZERO, Vec3::new(16.0, 1.0, 6.0))
                    .with_capacity(1),
            )
            .unwrap();
        registry
            .define_zone(ZoneConfig::new("deck", Vec3::new(9.0, 0.0, 0.0), Vec3::ONE).rejecting())
            .unwrap();
        registry
    }

    #[test]
    fn test_absorb() {
        let mut registry = registry();
        let mut tracker = MembershipTracker::new();
        let event = CollisionEvent {
            card: CardId(1),
            zone: ZoneId(0),
        };

        let outcome = absorb(&mut tracker, &mut registry, event, None);
        assert!(matches!(
            outcome,
            CollisionOutcome::Absorbed(change) if change.to == Some(ZoneId(0))
        ));

        let again = absorb(&mut tracker, &mut registry, event, None);
        assert_eq!(again, CollisionOutcome::AlreadyMember);
    }

    #[test]
    fn test_absorb_skips_dragged_card() {
        let mut registry = registry();
        let mut tracker = MembershipTracker::new();
        let event = CollisionEvent {
            card: CardId(1),
            zone: ZoneId(0),
        };

        let outcome = absorb(&mut tracker, &mut registry, event, Some(CardId(1)));
        assert_eq!(outcome, CollisionOutcome::IgnoredWhileDragged);
        assert_eq!(tracker.zone_of(CardId(1)), None);
    }

    #[test]
    fn test_absorb_refused() {
        let mut registry = registry();
        let mut tracker = MembershipTracker::new();

        let rejected = absorb(
            &mut tracker,
            &mut registry,
            CollisionEvent {
                card: CardId(1),
                zone: ZoneId(1),
            },
            None,
        );
        assert!(matches!(rejected, CollisionOutcome::Refused(SpatialError::ZoneRejectsCards(_))));

        let first = CollisionEvent {
            card: CardId(2),
            zone: ZoneId(0),
        };
        absorb(&mut tracker, &mut registry, first, None);
        let full = absorb(
            &mut tracker,
            &mut registry,
            CollisionEvent {
                card: CardId(3),
                zone: ZoneId(0),
            },
            None,
        );
        assert!(matches!(full, CollisionOutcome::Refused(SpatialError::ZoneFull { .. })));
        assert_eq!(registry.members_of("battlefield").unwrap(), &[CardId(2)]);
    }
}

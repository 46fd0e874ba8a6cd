//! The spatial engine for one game table.

use glam::Vec3;
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::arrange::{compute_layout, Animator};
use crate::bridge::{absorb, CollisionBridge, CollisionEvent, CollisionOutcome};
use crate::core::config::TableConfig;
use crate::core::entity::{CardId, DefinitionId, ZoneId};
use crate::core::error::{SpatialError, SpatialResult};
use crate::drag::{smooth_toward, DragController, DragSession, DropOutcome, DropResolution};
use crate::physics::{PhysicsProvider, CARD_SIZE};
use crate::zones::{MembershipChange, MembershipTracker, Zone, ZoneRegistry};

use super::card::{CardEntity, CardState};
use super::events::{TableEvent, TableSnapshot};

/// Everything spatial about one table: zones, cards, the drag, layout.
///
/// Constructed when the table opens and torn down when it closes. All
/// membership changes, whether from a drop, a collision or a direct call,
/// go through the same tracker, and each one re-arranges exactly the zones
/// it touched.
///
/// ## Example
///
/// ```
/// use ccg_table::core::{CardId, DefinitionId, TableConfig, ZoneConfig};
/// use ccg_table::physics::HeadlessPhysics;
/// use ccg_table::table::SpatialEngine;
/// use glam::Vec3;
///
/// let config = TableConfig::new("hand")
///     .with_zone(ZoneConfig::new("hand", Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0)))
///     .with_zone(ZoneConfig::new("battlefield", Vec3::ZERO, Vec3::new(16.0, 1.0, 6.0)));
/// let mut table = SpatialEngine::new(config, HeadlessPhysics::new()).unwrap();
///
/// table.spawn_card_in(CardId(1), DefinitionId(100), "hand").unwrap();
///
/// table.begin_drag(CardId(1)).unwrap();
/// for _ in 0..30 {
///     table.update_drag(Vec3::new(2.0, 0.0, 0.5));
/// }
/// let outcome = table.end_drag().unwrap();
///
/// assert_eq!(table.members_of("battlefield").unwrap(), &[CardId(1)]);
/// assert_eq!(outcome.card, CardId(1));
/// ```
pub struct SpatialEngine<P: PhysicsProvider> {
    config: TableConfig,
    registry: ZoneRegistry,
    tracker: MembershipTracker,
    animator: Animator,
    drag: DragController,
    bridge: CollisionBridge,
    cards: FxHashMap<CardId, CardEntity>,
    physics: P,
    fallback: ZoneId,
    clock: f32,
    events: Vec<TableEvent>,
    closed: bool,
}

impl<P: PhysicsProvider> SpatialEngine<P> {
    /// Build the table from its configuration.
    ///
    /// Fails on an invalid configuration or a duplicate zone name; no
    /// physics bodies are left behind in that case.
    pub fn new(config: TableConfig, physics: P) -> SpatialResult<Self> {
        config.validate()?;

        let mut registry = ZoneRegistry::new();
        for zone in &config.zones {
            registry.define_zone(zone.clone())?;
        }
        let fallback = registry.id_of(&config.fallback_zone)?;

        let mut engine = Self {
            config,
            registry,
            tracker: MembershipTracker::new(),
            animator: Animator::new(),
            drag: DragController::new(),
            bridge: CollisionBridge::new(),
            cards: FxHashMap::default(),
            physics,
            fallback,
            clock: 0.0,
            events: Vec::new(),
            closed: false,
        };

        for zone in engine.registry.iter() {
            let body = engine.physics.create_trigger_volume(zone.bounds());
            engine.bridge.register_zone(body, zone.id());
        }

        info!(
            zones = engine.registry.len(),
            fallback = %engine.config.fallback_zone,
            "table opened"
        );
        Ok(engine)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    #[must_use]
    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Direct access to the provider, e.g. to feed it contacts.
    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Engine clock in seconds.
    #[must_use]
    pub fn now(&self) -> f32 {
        self.clock
    }

    #[must_use]
    pub fn fallback_zone(&self) -> ZoneId {
        self.fallback
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> SpatialResult<()> {
        if self.closed {
            return Err(SpatialError::TableClosed);
        }
        Ok(())
    }

    // === Zone queries ===

    /// The zone containing `position` on the table plane.
    #[must_use]
    pub fn zone_at(&self, position: Vec3) -> Option<&Zone> {
        self.registry.zone_at(position)
    }

    pub fn zone_named(&self, name: &str) -> SpatialResult<&Zone> {
        self.registry.zone_named(name)
    }

    pub fn members_of(&self, name: &str) -> SpatialResult<&[CardId]> {
        self.registry.members_of(name)
    }

    /// The accepting zone under `position`, used to place a dropped card.
    ///
    /// Collisions arrive with their zone already named and are admitted by
    /// the same `Zone::check_admission` rule, so a zone refuses a drop
    /// exactly when it would refuse a contact.
    #[must_use]
    pub fn resolve_zone_for(&self, position: Vec3) -> Option<ZoneId> {
        self.registry
            .zone_at(position)
            .filter(|zone| zone.can_accept())
            .map(Zone::id)
    }

    // === Cards ===

    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&CardEntity> {
        self.cards.get(&card)
    }

    fn entity(&self, card: CardId) -> SpatialResult<&CardEntity> {
        self.cards.get(&card).ok_or(SpatialError::UnknownCard(card))
    }

    #[must_use]
    pub fn card_position(&self, card: CardId) -> Option<Vec3> {
        self.cards.get(&card).map(|c| c.position)
    }

    /// The zone a card is in. `None` while dragged or stranded.
    #[must_use]
    pub fn card_zone(&self, card: CardId) -> Option<ZoneId> {
        self.tracker.zone_of(card)
    }

    /// Iterate over cards in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &CardEntity> {
        self.cards.values()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Put a new card on the table at `position`, in no zone.
    pub fn spawn_card(
        &mut self,
        card: CardId,
        definition: DefinitionId,
        position: Vec3,
    ) -> SpatialResult<()> {
        self.ensure_open()?;
        if self.cards.contains_key(&card) {
            return Err(SpatialError::DuplicateCard(card));
        }
        let body = self
            .physics
            .create_card_body(CARD_SIZE, position, self.config.drag.resting_mass);
        self.bridge.register_card(body, card);
        self.cards
            .insert(card, CardEntity::new(card, definition, position, body));
        self.events.push(TableEvent::CardSpawned { card, position });
        debug!(%card, %definition, "card spawned");
        Ok(())
    }

    /// Put a new card straight into a zone.
    ///
    /// The zone is checked first, so a refused card is never created.
    pub fn spawn_card_in(
        &mut self,
        card: CardId,
        definition: DefinitionId,
        zone: &str,
    ) -> SpatialResult<()> {
        self.ensure_open()?;
        if self.cards.contains_key(&card) {
            return Err(SpatialError::DuplicateCard(card));
        }
        let target = self.registry.zone_named(zone)?;
        target.check_admission()?;
        let position = target.bounds().center() + Vec3::Y * self.config.arrangement.rest_height;
        let zone_id = target.id();

        self.spawn_card(card, definition, position)?;
        self.place(card, zone_id)?;
        Ok(())
    }

    /// Remove a card from the table entirely.
    ///
    /// A dragged card's session ends without a drop.
    pub fn despawn_card(&mut self, card: CardId) -> SpatialResult<()> {
        self.ensure_open()?;
        let body = self.entity(card)?.body;

        if self.drag.is_dragging(card) {
            self.drag.finish();
        }
        let change = self.tracker.release(&mut self.registry, card);
        self.apply_change(change);
        self.animator.cancel(card);
        self.bridge.unregister(body);
        self.physics.remove_body(body);
        self.cards.remove(&card);

        self.events.push(TableEvent::CardDespawned { card });
        debug!(%card, "card despawned");
        Ok(())
    }

    /// Lock or unlock a card for dragging.
    pub fn set_card_locked(&mut self, card: CardId, locked: bool) -> SpatialResult<()> {
        self.ensure_open()?;
        let entity = self.cards.get_mut(&card).ok_or(SpatialError::UnknownCard(card))?;
        entity.locked = locked;
        Ok(())
    }

    // === Membership ===

    /// Move a card into the named zone.
    ///
    /// On success the card's old zone (if any) and the new zone are each
    /// re-arranged once.
    pub fn assign(&mut self, card: CardId, zone: &str) -> SpatialResult<MembershipChange> {
        self.ensure_open()?;
        self.entity(card)?;
        let zone = self.registry.id_of(zone)?;
        self.place(card, zone)
    }

    /// Take a card out of its zone. Releasing a zone-less card does nothing.
    pub fn release(&mut self, card: CardId) -> SpatialResult<MembershipChange> {
        self.ensure_open()?;
        self.entity(card)?;
        let change = self.tracker.release(&mut self.registry, card);
        self.apply_change(change);
        Ok(change)
    }

    fn place(&mut self, card: CardId, zone: ZoneId) -> SpatialResult<MembershipChange> {
        let change = self.tracker.assign(&mut self.registry, card, zone)?;
        self.apply_change(change);
        Ok(change)
    }

    /// Publish a membership change and re-arrange the zones it touched.
    fn apply_change(&mut self, change: MembershipChange) {
        if change.is_noop() {
            return;
        }
        self.events.push(TableEvent::ZoneChanged {
            card: change.card,
            from: change.from,
            to: change.to,
        });
        for zone in change.affected_zones() {
            self.arrange_zone(zone);
        }
    }

    // === Arrangement ===

    /// Recompute the named zone's layout and start moving its cards.
    pub fn arrange(&mut self, zone: &str) -> SpatialResult<()> {
        self.ensure_open()?;
        let zone = self.registry.id_of(zone)?;
        self.arrange_zone(zone);
        Ok(())
    }

    fn arrange_zone(&mut self, zone: ZoneId) {
        let Some(target) = self.registry.get(zone) else {
            return;
        };
        let members = target.members().to_vec();
        let layout = compute_layout(target.bounds(), members.len(), &self.config.arrangement);
        let duration = self.config.arrangement.relocation_duration;
        let dragged = self.drag.active_card();

        for (card, destination) in members.iter().zip(layout) {
            if dragged == Some(*card) {
                continue;
            }
            if let Some(entity) = self.cards.get(card) {
                self.animator
                    .start(*card, entity.position, destination, self.clock, duration);
            }
        }

        self.events.push(TableEvent::ZoneArranged {
            zone,
            members: members.len(),
        });
    }

    /// Where a card is headed, if it is being relocated.
    #[must_use]
    pub fn relocation_target(&self, card: CardId) -> Option<Vec3> {
        self.animator.get(card).map(|r| r.to)
    }

    // === Drag ===

    /// Pick up a card.
    ///
    /// The card leaves its zone, stops simulating and is lifted. Fails with
    /// `AlreadyDragging` while another drag is active, leaving that drag
    /// alone.
    pub fn begin_drag(&mut self, card: CardId) -> SpatialResult<DragSession> {
        self.ensure_open()?;
        let entity = self.entity(card)?;
        if let Some(active) = self.drag.active_card() {
            return Err(SpatialError::AlreadyDragging { active });
        }
        if entity.locked {
            return Err(SpatialError::CardLocked(card));
        }
        let body = entity.body;
        let lifted = entity.position + Vec3::Y * self.config.drag.lift_height;
        let origin = self.tracker.zone_of(card);

        let session = self.drag.begin(card, origin, lifted, self.clock)?;

        self.animator.cancel(card);
        let change = self.tracker.release(&mut self.registry, card);
        self.apply_change(change);

        self.physics.set_mass(body, 0.0);
        self.physics.zero_velocity(body);
        self.move_card(card, lifted);

        self.events.push(TableEvent::DragStarted { card, origin });
        debug!(%card, origin = ?origin, "drag started");
        Ok(session)
    }

    /// Steer the dragged card toward a pointer position on the table plane.
    ///
    /// The card keeps its drag height and closes part of the distance each
    /// call. Returns false when nothing is being dragged.
    pub fn update_drag(&mut self, pointer: Vec3) -> bool {
        let Some(session) = self.drag.session().copied() else {
            return false;
        };
        let target = Vec3::new(pointer.x, session.target.y, pointer.z);
        self.drag.set_target(target);

        let Some(current) = self.card_position(session.card) else {
            return false;
        };
        let next = smooth_toward(current, target, self.config.drag.smoothing);
        self.move_card(session.card, next);

        let hover = self.registry.zone_at(next);
        let hover_id = hover.map(Zone::id);
        let accepts = hover.is_some_and(Zone::can_accept);
        if self.drag.set_hover(hover_id) {
            self.events.push(TableEvent::HoverChanged {
                card: session.card,
                zone: hover_id,
                accepts,
            });
        }
        true
    }

    /// Let go of the dragged card.
    ///
    /// The card lands in the accepting zone under it, else the fallback
    /// zone, else the zone it came from. Returns `None` when idle.
    pub fn end_drag(&mut self) -> Option<DropOutcome> {
        let session = self.drag.finish()?;
        let card = session.card;
        let Some(entity) = self.cards.get(&card) else {
            warn!(%card, "drag ended for a card that is no longer on the table");
            return None;
        };
        let body = entity.body;
        let lowered = entity.position - Vec3::Y * self.config.drag.lift_height;

        self.move_card(card, lowered);
        self.physics.set_mass(body, self.config.drag.resting_mass);

        let mut candidates = Vec::with_capacity(3);
        if let Some(zone) = self.resolve_zone_for(lowered) {
            candidates.push((zone, DropResolution::Target));
        }
        candidates.push((self.fallback, DropResolution::Fallback));
        if let Some(origin) = session.origin {
            candidates.push((origin, DropResolution::Origin));
        }

        let mut outcome = DropOutcome {
            card,
            zone: None,
            resolution: DropResolution::Stranded,
        };
        for (zone, resolution) in candidates {
            match self.place(card, zone) {
                Ok(_) => {
                    outcome.zone = Some(zone);
                    outcome.resolution = resolution;
                    break;
                }
                Err(err) => debug!(%card, %zone, %err, "drop candidate refused"),
            }
        }

        match outcome.resolution {
            DropResolution::Target => debug!(%card, zone = ?outcome.zone, "card dropped"),
            DropResolution::Fallback | DropResolution::Origin => {
                info!(
                    %card,
                    zone = ?outcome.zone,
                    resolution = ?outcome.resolution,
                    "card returned"
                )
            }
            DropResolution::Stranded => warn!(%card, "no zone could take the dropped card"),
        }
        self.events.push(TableEvent::DragEnded { outcome });
        Some(outcome)
    }

    /// The active drag, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.session().is_some()
    }

    // === Collisions ===

    /// Apply a card-touches-zone notification.
    ///
    /// Cards under the drag or on their way to an arranged position stay
    /// where they are; the contact is reported as ignored.
    pub fn handle_collision(&mut self, event: CollisionEvent) -> CollisionOutcome {
        if let Err(err) = self.ensure_open() {
            return CollisionOutcome::Refused(err);
        }
        if self.animator.is_animating(event.card) {
            trace!(card = %event.card, zone = %event.zone, "collision ignored during relocation");
            return CollisionOutcome::IgnoredWhileRelocating;
        }
        let outcome = absorb(
            &mut self.tracker,
            &mut self.registry,
            event,
            self.drag.active_card(),
        );
        if let CollisionOutcome::Absorbed(change) = &outcome {
            self.apply_change(*change);
        }
        outcome
    }

    // === Frame ===

    /// Advance the table by `dt` seconds.
    ///
    /// Processes physics contacts, advances relocations and picks up
    /// physics-driven positions for cards nobody else is moving.
    pub fn tick(&mut self, dt: f32) {
        if self.closed {
            return;
        }
        self.clock += dt.max(0.0);

        for contact in self.physics.drain_contacts() {
            if let Some(event) = self.bridge.resolve(contact) {
                self.handle_collision(event);
            }
        }

        for (card, position) in self.animator.advance(self.clock) {
            self.move_card(card, position);
        }

        let dragged = self.drag.active_card();
        for entity in self.cards.values_mut() {
            if dragged == Some(entity.id) || self.animator.is_animating(entity.id) {
                continue;
            }
            if let Some(position) = self.physics.position(entity.body) {
                entity.position = position;
            }
        }
    }

    fn move_card(&mut self, card: CardId, position: Vec3) {
        if let Some(entity) = self.cards.get_mut(&card) {
            entity.position = position;
            self.physics.set_position(entity.body, position);
        }
    }

    // === Renderer ===

    /// Take all events since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let mut cards: Vec<CardState> = self
            .cards
            .values()
            .map(|entity| CardState {
                card: entity.id,
                definition: entity.definition,
                position: entity.position,
                zone: self.tracker.zone_of(entity.id),
                locked: entity.locked,
                moving: self.animator.is_animating(entity.id),
            })
            .collect();
        cards.sort_by_key(|state| state.card);

        TableSnapshot {
            time: self.clock,
            cards,
            dragging: self.drag.active_card(),
        }
    }

    // === Teardown ===

    /// Close the table: empty every zone, end any drag, release all bodies.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.drag.finish();
        self.animator.clear();
        self.tracker.clear(&mut self.registry);

        for entity in self.cards.values() {
            self.physics.remove_body(entity.body);
        }
        for body in self.bridge.zone_bodies() {
            self.physics.remove_body(body);
        }

        let cards = self.cards.len();
        self.cards.clear();
        self.bridge.clear();
        self.registry.clear();
        self.events.clear();
        self.closed = true;
        info!(cards, "table closed");
    }
}

impl<P: PhysicsProvider> Drop for SpatialEngine<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<P: PhysicsProvider> std::fmt::Debug for SpatialEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialEngine")
            .field("zones", &self.registry.len())
            .field("cards", &self.cards.len())
            .field("dragging", &self.drag.active_card())
            .field("clock", &self.clock)
            .field("closed", &self.closed)
            .finish()
    }
}

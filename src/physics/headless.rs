//! A physics provider that stores bodies but never simulates them.
//!
//! Positions only change when the engine writes them. Contacts come from
//! `queue_contact` or from an explicit `detect_trigger_overlaps` pass.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::core::geometry::Aabb;

use super::{BodyHandle, Contact, PhysicsProvider};

/// State of one headless body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessBody {
    pub position: Vec3,
    pub size: Vec3,
    pub mass: f32,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub trigger: bool,
}

impl HeadlessBody {
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }
}

/// In-memory `PhysicsProvider`.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPhysics {
    bodies: FxHashMap<BodyHandle, HeadlessBody>,
    pending: Vec<Contact>,
    next_id: u64,
}

impl HeadlessPhysics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, body: HeadlessBody) -> BodyHandle {
        let handle = BodyHandle::new(self.next_id);
        self.next_id += 1;
        self.bodies.insert(handle, body);
        handle
    }

    /// Inspect a body.
    #[must_use]
    pub fn body(&self, handle: BodyHandle) -> Option<&HeadlessBody> {
        self.bodies.get(&handle)
    }

    /// Give a body some velocity, e.g. to check that dragging zeroes it.
    pub fn set_velocity(&mut self, handle: BodyHandle, linear: Vec3, angular: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.linear_velocity = linear;
            body.angular_velocity = angular;
        }
    }

    /// Report a contact on the next drain.
    pub fn queue_contact(&mut self, a: BodyHandle, b: BodyHandle) {
        self.pending.push(Contact::new(a, b));
    }

    /// Queue a contact for every simulated body resting inside a trigger
    /// volume's footprint.
    pub fn detect_trigger_overlaps(&mut self) {
        let mut handles: Vec<_> = self.bodies.keys().copied().collect();
        handles.sort();

        for &card in &handles {
            let body = self.bodies[&card];
            if body.trigger || body.mass <= 0.0 {
                continue;
            }
            for &volume in &handles {
                let trigger = self.bodies[&volume];
                if trigger.trigger && trigger.bounds().contains_footprint(body.position) {
                    self.pending.push(Contact::new(card, volume));
                }
            }
        }
    }

    /// Number of live bodies.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl PhysicsProvider for HeadlessPhysics {
    fn create_card_body(&mut self, size: Vec3, position: Vec3, mass: f32) -> BodyHandle {
        self.insert(HeadlessBody {
            position,
            size,
            mass,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            trigger: false,
        })
    }

    fn create_trigger_volume(&mut self, bounds: &Aabb) -> BodyHandle {
        self.insert(HeadlessBody {
            position: bounds.center(),
            size: bounds.size(),
            mass: 0.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            trigger: true,
        })
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(&body);
        self.pending.retain(|c| c.a != body && c.b != body);
    }

    fn set_mass(&mut self, body: BodyHandle, mass: f32) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.mass = mass;
        }
    }

    fn zero_velocity(&mut self, body: BodyHandle) {
        self.set_velocity(body, Vec3::ZERO, Vec3::ZERO);
    }

    fn position(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.position)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.position = position;
        }
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.pending)
    }
}

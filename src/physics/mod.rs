//! Binding to an external rigid-body physics provider.
//!
//! The spatial engine does not simulate anything itself. It asks a
//! `PhysicsProvider` for a body per card and a trigger volume per zone,
//! toggles a card's simulation by setting its mass, and reads contacts the
//! provider reports between bodies.
//!
//! ## Key Types
//!
//! - `PhysicsProvider`: the narrow interface the engine calls
//! - `BodyHandle`: opaque handle to a body owned by the provider
//! - `Contact`: two bodies whose volumes started touching
//! - `HeadlessPhysics`: in-memory provider without simulation, for hosts
//!   that drive positions themselves and for tests

mod headless;

pub use headless::{HeadlessBody, HeadlessPhysics};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Aabb;

/// Footprint of a card body: width, thickness, depth.
pub const CARD_SIZE: Vec3 = Vec3::new(1.0, 0.02, 1.4);

/// Opaque handle to a provider-owned body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

impl BodyHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Two bodies whose volumes intersect. Order is not significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl Contact {
    #[must_use]
    pub const fn new(a: BodyHandle, b: BodyHandle) -> Self {
        Self { a, b }
    }
}

/// The capabilities the spatial engine needs from a physics backend.
///
/// Calls with a handle the provider doesn't know must be ignored, not
/// panic: the engine may race a removal against a queued contact.
pub trait PhysicsProvider {
    /// Create a dynamic body for a card.
    fn create_card_body(&mut self, size: Vec3, position: Vec3, mass: f32) -> BodyHandle;

    /// Create a static, non-solid volume that reports contacts.
    fn create_trigger_volume(&mut self, bounds: &Aabb) -> BodyHandle;

    /// Destroy a body. Unknown handles are ignored.
    fn remove_body(&mut self, body: BodyHandle);

    /// Set a body's mass. Zero mass takes it out of the simulation.
    fn set_mass(&mut self, body: BodyHandle, mass: f32);

    /// Zero linear and angular velocity.
    fn zero_velocity(&mut self, body: BodyHandle);

    /// Current world position.
    fn position(&self, body: BodyHandle) -> Option<Vec3>;

    /// Teleport a body.
    fn set_position(&mut self, body: BodyHandle, position: Vec3);

    /// Contacts reported since the last call.
    fn drain_contacts(&mut self) -> Vec<Contact>;
}

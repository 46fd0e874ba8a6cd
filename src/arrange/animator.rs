//! Pending relocations and their per-tick advancement.
//!
//! A relocation is a plain record (start, target, start time, duration).
//! Nothing runs on its own timer: the owner calls `advance` once per frame
//! with the current clock and writes the sampled positions back.

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;

/// An interpolated move from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    pub from: Vec3,
    pub to: Vec3,
    pub started_at: f32,
    pub duration: f32,
}

impl Relocation {
    /// Fraction of the move completed at `now`, in `0..=1`.
    #[must_use]
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    /// Position at time `now`.
    #[must_use]
    pub fn sample(&self, now: f32) -> Vec3 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, t)
    }

    #[must_use]
    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

/// All relocations in flight, at most one per card.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    relocations: FxHashMap<CardId, Relocation>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start moving `card` from `from` to `to`.
    ///
    /// Replaces any relocation already running for the card; the caller
    /// passes the card's current (possibly mid-flight) position as `from`.
    pub fn start(&mut self, card: CardId, from: Vec3, to: Vec3, now: f32, duration: f32) {
        self.relocations.insert(
            card,
            Relocation {
                from,
                to,
                started_at: now,
                duration,
            },
        );
    }

    /// Stop moving `card`, leaving it wherever it last was.
    pub fn cancel(&mut self, card: CardId) -> Option<Relocation> {
        self.relocations.remove(&card)
    }

    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&Relocation> {
        self.relocations.get(&card)
    }

    #[must_use]
    pub fn is_animating(&self, card: CardId) -> bool {
        self.relocations.contains_key(&card)
    }

    /// Sample every relocation at `now`, dropping the ones that finished.
    ///
    /// Finished moves report their exact target. Output is sorted by card.
    pub fn advance(&mut self, now: f32) -> Vec<(CardId, Vec3)> {
        let mut positions: Vec<(CardId, Vec3)> = self
            .relocations
            .iter()
            .map(|(&card, relocation)| (card, relocation.sample(now)))
            .collect();
        self.relocations.retain(|_, relocation| !relocation.is_finished(now));
        positions.sort_by_key(|(card, _)| *card);
        positions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.relocations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relocations.is_empty()
    }

    pub fn clear(&mut self) {
        self.relocations.clear();
    }
}

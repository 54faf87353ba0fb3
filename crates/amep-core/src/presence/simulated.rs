//! Random-walk presence simulation.

use super::{PresenceSource, RemoteActor, seed_actors};
use kurbo::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum per-axis offset applied to an actor on each tick.
pub const JITTER_PX: f64 = 5.0;

/// Presence source that jitters a fixed set of actors.
///
/// Positions are not clamped to the canvas, so actors can drift out of view
/// over a long session.
#[derive(Debug, Clone)]
pub struct SimulatedPresence {
    actors: Vec<RemoteActor>,
    rng: StdRng,
}

impl Default for SimulatedPresence {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPresence {
    /// Seed actors with an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_actors(seed_actors(), StdRng::from_os_rng())
    }

    /// Seed actors with a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_actors(seed_actors(), StdRng::seed_from_u64(seed))
    }

    pub fn with_actors(actors: Vec<RemoteActor>, rng: StdRng) -> Self {
        Self { actors, rng }
    }
}

impl PresenceSource for SimulatedPresence {
    fn actors(&self) -> &[RemoteActor] {
        &self.actors
    }

    fn tick(&mut self) {
        for actor in &mut self.actors {
            let dx = self.rng.random_range(-JITTER_PX..=JITTER_PX);
            let dy = self.rng.random_range(-JITTER_PX..=JITTER_PX);
            actor.position += Vec2::new(dx, dy);
        }
    }
}

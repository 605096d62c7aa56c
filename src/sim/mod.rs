//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order for obstacles)
//! - No rendering, storage or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod mutator;
pub mod obstacle;
pub mod particles;
pub mod profile;
pub mod state;
pub mod tick;

pub use body::Body;
pub use clock::{Clock, FixedStep};
pub use collision::{body_hits_bounds, body_hits_obstacle, collides};
pub use mutator::{Mutator, SlotSpin, select_winner, spin};
pub use obstacle::{Obstacle, ObstacleField};
pub use particles::{PALETTE, Particle, ParticleSystem};
pub use profile::{Difficulty, DifficultyProfile};
pub use state::{RunState, SimulationState, Snapshot, World};
pub use tick::{Command, GameEvent, tick};

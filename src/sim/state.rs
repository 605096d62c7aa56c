//! Simulation state and world geometry
//!
//! `SimulationState` is the single aggregate mutated by `tick`; there is no
//! other game state anywhere in the crate.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::clock::Clock;
use super::mutator::Mutator;
use super::obstacle::ObstacleField;
use super::particles::ParticleSystem;
use super::profile::Difficulty;
use crate::consts::*;

/// Lifecycle state of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Body parked at center, waiting for the first input
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a collision; waiting for spin and/or reset
    Crashed,
}

/// Dimensions supplied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Height of the ground band at the bottom of the world
    pub floor_height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            floor_height: REFERENCE_FLOOR_HEIGHT,
        }
    }
}

impl World {
    pub fn new(width: f32, height: f32, floor_height: f32) -> Self {
        Self {
            width,
            height,
            floor_height,
        }
    }

    #[inline]
    pub fn horizontal_scale(&self) -> f32 {
        self.width / REFERENCE_WIDTH
    }

    #[inline]
    pub fn vertical_scale(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }

    /// Top of the ground band
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.floor_height
    }

    pub fn body_x(&self) -> f32 {
        BODY_X * self.horizontal_scale()
    }

    pub fn body_radius(&self) -> f32 {
        BODY_RADIUS * self.vertical_scale()
    }

    pub fn obstacle_width(&self) -> f32 {
        OBSTACLE_WIDTH * self.horizontal_scale()
    }

    /// Inclusive range gap centers may spawn in
    pub fn spawn_band(&self) -> (f32, f32) {
        let min = SPAWN_MARGIN_TOP * self.vertical_scale();
        let max = self.height - SPAWN_MARGIN_BOTTOM * self.vertical_scale();
        (min, max.max(min))
    }

    /// Where the body rests while idle
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub world: World,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared random source for spawns, spins and bursts
    pub rng: Pcg32,
    pub clock: Clock,
    pub phase: RunState,
    pub difficulty: Difficulty,
    pub body: Body,
    pub obstacles: ObstacleField,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub score: u32,
    /// Score of the most recent finished run
    pub last: u32,
    pub best: u32,
    /// Mutator applied to the current run
    pub active_mutator: Option<Mutator>,
    /// Mutator queued for the next run
    pub pending_mutator: Option<Mutator>,
    /// One spin per crash
    pub spin_available: bool,
}

impl SimulationState {
    /// Create an idle simulation. `best` is the previously persisted best score.
    pub fn new(world: World, difficulty: Difficulty, best: u32, seed: u64) -> Self {
        let profile = difficulty.profile();
        let mut state = Self {
            world,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::default(),
            phase: RunState::Idle,
            difficulty,
            body: Body::new(
                world.body_x(),
                world.center_y(),
                world.body_radius(),
                profile.gravity,
                profile.thrust_impulse,
            ),
            obstacles: ObstacleField::new(&world, &profile),
            particles: ParticleSystem::default(),
            score: 0,
            last: 0,
            best,
            active_mutator: None,
            pending_mutator: None,
            spin_available: false,
        };
        state.apply_difficulty();
        state
    }

    /// Re-derive body and obstacle parameters from the profile and active mutator
    pub fn apply_difficulty(&mut self) {
        let profile = self.difficulty.profile();
        self.body.configure(profile.gravity, profile.thrust_impulse);
        if self.active_mutator == Some(Mutator::LowGravity) {
            self.body.gravity *= LOW_GRAVITY_SCALE;
        }
        self.obstacles.configure(&profile);
    }

    /// Whether flaps currently push downward
    pub fn controls_reversed(&self) -> bool {
        self.active_mutator == Some(Mutator::ReversedControls)
    }

    /// Pure view of the state for presentation layers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            phase: self.phase,
            frame: self.clock.frame(),
            score: self.score,
            last: self.last,
            best: self.best,
            difficulty: self.difficulty,
            active_mutator: self.active_mutator,
            pending_mutator: self.pending_mutator,
            spin_available: self.spin_available,
            body_y: self.body.y,
            velocity_y: self.body.velocity_y,
            obstacle_count: self.obstacles.len(),
            particle_count: self.particles.len(),
        }
    }
}

/// Read-only projection of `SimulationState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seed the session was started with; replaying it reproduces the run
    pub seed: u64,
    pub phase: RunState,
    pub frame: u64,
    pub score: u32,
    pub last: u32,
    pub best: u32,
    pub difficulty: Difficulty,
    pub active_mutator: Option<Mutator>,
    pub pending_mutator: Option<Mutator>,
    pub spin_available: bool,
    pub body_y: f32,
    pub velocity_y: f32,
    pub obstacle_count: usize,
    pub particle_count: usize,
}

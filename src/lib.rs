//! Moon Hopper - a side-scrolling arcade hopper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacles, collisions, mutators, particles)
//! - `game`: Frame driver gluing the simulation to storage, settings and music
//! - `hud`: Stateless text projection of a simulation snapshot
//! - `persistence`: Key/value storage backends
//! - `audio`: Background music sequencer
//! - `platform`: Browser/native platform abstraction

pub mod audio;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::BestScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Geometry is given for the 720x360 reference world; `sim::World` scales it
/// for other sizes.
pub mod consts {
    /// Fixed simulation timestep: one step per 60 Hz display frame
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Reference world dimensions
    pub const REFERENCE_WIDTH: f32 = 720.0;
    pub const REFERENCE_HEIGHT: f32 = 360.0;
    pub const REFERENCE_FLOOR_HEIGHT: f32 = 70.0;

    /// Body defaults
    pub const BODY_X: f32 = 140.0;
    pub const BODY_RADIUS: f32 = 18.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 56.0;
    /// Gap centers never spawn closer than this to the ceiling
    pub const SPAWN_MARGIN_TOP: f32 = 120.0;
    /// ...or this to the bottom of the world
    pub const SPAWN_MARGIN_BOTTOM: f32 = 160.0;

    /// Gravity multiplier while Low Gravity is active
    pub const LOW_GRAVITY_SCALE: f32 = 0.65;

    /// Particles spawned by an Explosions crash
    pub const CRASH_BURST_COUNT: usize = 20;
}

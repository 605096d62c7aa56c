//! Procedurally spawned obstacles
//!
//! Each obstacle is a full-height column with a vertical gap. Obstacles enter
//! at the right edge and scroll left, so spawn order is also left-to-right
//! order; the field never reorders them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::profile::DifficultyProfile;
use super::state::World;

/// A gap column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub gap_center_y: f32,
    /// Set once when the trailing edge clears the body
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_center_y: f32) -> Self {
        Self {
            x,
            gap_center_y,
            passed: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Vertical extent of the opening (top, bottom)
    #[inline]
    pub fn gap_bounds(&self, gap: f32) -> (f32, f32) {
        (self.gap_center_y - gap / 2.0, self.gap_center_y + gap / 2.0)
    }
}

/// Ordered sequence of live obstacles plus the parameters that shape them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    pub width: f32,
    pub gap: f32,
    pub speed: f32,
    pub spawn_interval: u64,
    /// Left edge of freshly spawned obstacles
    spawn_x: f32,
    /// Inclusive range of gap centers
    spawn_band: (f32, f32),
}

impl ObstacleField {
    pub fn new(world: &World, profile: &DifficultyProfile) -> Self {
        let width = world.obstacle_width();
        Self {
            obstacles: Vec::new(),
            width,
            gap: profile.gap,
            speed: profile.speed,
            spawn_interval: profile.spawn_interval,
            spawn_x: world.width + width,
            spawn_band: world.spawn_band(),
        }
    }

    /// Take gap, speed and spawn cadence from a profile
    pub fn configure(&mut self, profile: &DifficultyProfile) {
        self.gap = profile.gap;
        self.speed = profile.speed;
        self.spawn_interval = profile.spawn_interval;
    }

    /// Spawn a new obstacle on spawn ticks. Returns true if one was spawned.
    pub fn maybe_spawn<R: Rng + ?Sized>(&mut self, frame: u64, rng: &mut R) -> bool {
        if self.spawn_interval == 0 || frame % self.spawn_interval != 0 {
            return false;
        }
        let (min, max) = self.spawn_band;
        let center = if max > min {
            rng.random_range(min..=max)
        } else {
            min
        };
        self.push(Obstacle::new(self.spawn_x, center));
        true
    }

    /// Place an obstacle directly (scenarios, replays)
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(
            self.obstacles.last().is_none_or(|last| last.x <= obstacle.x),
            "obstacles must be pushed left-to-right"
        );
        self.obstacles.push(obstacle);
    }

    /// Scroll everything left and retire obstacles past the left bound.
    /// Returns the number retired.
    pub fn advance(&mut self) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }
        // Sorted by position, so everything off-screen is a prefix
        let width = self.width;
        let retired = self
            .obstacles
            .iter()
            .take_while(|o| o.trailing_edge(width) < 0.0)
            .count();
        self.obstacles.drain(..retired);
        retired
    }

    /// Mark obstacles the body has cleared; returns how many were newly passed
    pub fn score_crossings(&mut self, body_x: f32) -> u32 {
        let width = self.width;
        let mut crossed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.trailing_edge(width) < body_x {
                obstacle.passed = true;
                crossed += 1;
            }
        }
        crossed
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// First obstacle whose trailing edge is still right of `x`
    pub fn next_ahead_of(&self, x: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.trailing_edge(self.width) >= x)
    }
}

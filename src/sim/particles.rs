//! Decorative particles
//!
//! Purely visual: nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Burst colors (0xRRGGBB): gold, orange, red
pub const PALETTE: [u32; 3] = [0xf7d66a, 0xff8c42, 0xf25c5c];

/// Per-frame size decay
const SIZE_DECAY: f32 = 0.97;
/// Particles at or below this size are invisible and removed
const MIN_VISIBLE_SIZE: f32 = 0.5;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames remaining
    pub life: f32,
    /// Index into `PALETTE`
    pub color_index: u8,
}

impl Particle {
    pub fn color(&self) -> u32 {
        PALETTE[self.color_index as usize % PALETTE.len()]
    }

    fn alive(&self) -> bool {
        self.life > 0.0 && self.size > MIN_VISIBLE_SIZE
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Spray `count` particles from `origin`
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, origin: Vec2, count: usize, rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)),
                size: rng.random_range(2.0..6.0),
                life: rng.random_range(30.0..50.0),
                color_index: rng.random_range(0..PALETTE.len()) as u8,
            });
        }
    }

    /// Move, age and shrink every particle; drop the dead ones
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= 1.0;
            p.size *= SIZE_DECAY;
        }
        self.particles.retain(Particle::alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

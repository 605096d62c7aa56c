//! The player's body
//!
//! The world scrolls past a fixed `x`; only the vertical axis is simulated.

use serde::{Deserialize, Serialize};

/// The player-controlled falling body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Fixed horizontal position
    pub x: f32,
    /// Vertical center (grows downward)
    pub y: f32,
    pub radius: f32,
    pub velocity_y: f32,
    /// Added to `velocity_y` each frame
    pub gravity: f32,
    /// Velocity set by a flap (negative is up)
    pub thrust_impulse: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, radius: f32, gravity: f32, thrust_impulse: f32) -> Self {
        Self {
            x,
            y,
            radius,
            velocity_y: 0.0,
            gravity,
            thrust_impulse,
        }
    }

    /// Advance one frame under gravity
    pub fn integrate(&mut self) {
        self.velocity_y += self.gravity;
        self.y += self.velocity_y;
    }

    /// Flap: overrides vertical velocity. Reversed controls push downward.
    pub fn apply_thrust(&mut self, reversed: bool) {
        self.velocity_y = if reversed {
            self.thrust_impulse.abs()
        } else {
            self.thrust_impulse
        };
    }

    /// Swap physics constants without touching position or velocity
    pub fn configure(&mut self, gravity: f32, thrust_impulse: f32) {
        self.gravity = gravity;
        self.thrust_impulse = thrust_impulse;
    }

    /// Move to `y` at rest
    pub fn place(&mut self, y: f32) {
        self.y = y;
        self.velocity_y = 0.0;
    }

    /// Top of the body's vertical span
    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    /// Bottom of the body's vertical span
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }
}

//! Frame counter and fixed-step accumulator

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Discrete frame counter owned by the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    frame: u64,
}

impl Clock {
    /// Advance one frame, returning the new frame number
    pub fn step(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Converts host wall-clock deltas into a whole number of simulation frames
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Feed `dt` seconds, get the number of frames to simulate now
    pub fn advance(&mut self, dt: f32) -> u32 {
        // A long stall (tab hidden) must not replay seconds of gameplay, and a
        // bogus host delta must not poison the accumulator
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_counts_and_resets() {
        let mut clock = Clock::default();
        assert_eq!(clock.step(), 1);
        assert_eq!(clock.step(), 2);
        clock.reset();
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut fixed = FixedStep::new(0.01, 8);
        assert_eq!(fixed.advance(0.005), 0);
        assert_eq!(fixed.advance(0.006), 1);
        assert_eq!(fixed.advance(0.0305), 3);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut fixed = FixedStep::new(0.01, 4);
        assert_eq!(fixed.advance(0.1), 4);
        // Leftover is capped to one step
        assert_eq!(fixed.advance(0.0), 1);
        assert_eq!(fixed.advance(0.0), 0);
    }

    #[test]
    fn test_fixed_step_ignores_non_finite_dt() {
        let mut fixed = FixedStep::new(0.01, 4);
        assert_eq!(fixed.advance(f32::NAN), 0);
        assert_eq!(fixed.advance(f32::INFINITY), 0);
        assert_eq!(fixed.advance(f32::NEG_INFINITY), 0);
        assert_eq!(fixed.advance(0.025), 2);
    }
}

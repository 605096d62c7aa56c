//! Mutators and the post-crash slot spin
//!
//! A spin shows three reels, then draws the winner from those reels with a
//! second, independent roll. The reels are flavor: the winner is not
//! necessarily the majority reel.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Gameplay modifier active for exactly one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutator {
    /// Gravity scaled down for the whole run
    LowGravity,
    /// Particle burst at the crash site
    Explosions,
    /// Flaps push the body down instead of up
    ReversedControls,
}

impl Mutator {
    pub const ALL: [Mutator; 3] = [
        Mutator::LowGravity,
        Mutator::Explosions,
        Mutator::ReversedControls,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mutator::LowGravity => "Low Gravity",
            Mutator::Explosions => "Explosions",
            Mutator::ReversedControls => "Reversed Controls",
        }
    }

    /// Glyph shown on a slot reel
    pub fn reel_glyph(&self) -> &'static str {
        match self {
            Mutator::LowGravity => "🌙",
            Mutator::Explosions => "💥",
            Mutator::ReversedControls => "🔁",
        }
    }
}

impl std::fmt::Display for Mutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one slot spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpin {
    pub reels: [Mutator; 3],
    pub winner: Mutator,
}

impl SlotSpin {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let reels = spin(rng);
        let winner = select_winner(&reels, rng);
        Self { reels, winner }
    }
}

/// Draw three reels uniformly with replacement
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> [Mutator; 3] {
    std::array::from_fn(|_| Mutator::ALL[rng.random_range(0..Mutator::ALL.len())])
}

/// Pick one of the displayed reels uniformly
pub fn select_winner<R: Rng + ?Sized>(reels: &[Mutator; 3], rng: &mut R) -> Mutator {
    reels[rng.random_range(0..reels.len())]
}

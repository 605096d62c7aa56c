//! Difficulty presets
//!
//! Values are fixed for compatibility with existing high scores.

use serde::{Deserialize, Serialize};

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Chill,
    #[default]
    Classic,
    Cosmic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Chill, Difficulty::Classic, Difficulty::Cosmic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Chill => "chill",
            Difficulty::Classic => "classic",
            Difficulty::Cosmic => "cosmic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chill" => Some(Difficulty::Chill),
            "classic" => Some(Difficulty::Classic),
            "cosmic" => Some(Difficulty::Cosmic),
            _ => None,
        }
    }

    /// Physics and spawn constants for this preset
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Chill => DifficultyProfile {
                gap: 170.0,
                speed: 2.0,
                spawn_interval: 140,
                gravity: 0.25,
                thrust_impulse: -5.3,
            },
            Difficulty::Classic => DifficultyProfile {
                gap: 150.0,
                speed: 2.2,
                spawn_interval: 120,
                gravity: 0.28,
                thrust_impulse: -5.2,
            },
            Difficulty::Cosmic => DifficultyProfile {
                gap: 130.0,
                speed: 2.6,
                spawn_interval: 105,
                gravity: 0.32,
                thrust_impulse: -5.1,
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bundle of difficulty-affecting constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Full vertical opening of each obstacle
    pub gap: f32,
    /// Leftward scroll per frame
    pub speed: f32,
    /// Frames between obstacle spawns
    pub spawn_interval: u64,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative is up)
    pub thrust_impulse: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_str("chill"), Some(Difficulty::Chill));
        assert_eq!(Difficulty::from_str(" Cosmic "), Some(Difficulty::Cosmic));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Some(difficulty));
        }
    }

    #[test]
    fn test_classic_values() {
        let p = Difficulty::Classic.profile();
        assert_eq!(p.gap, 150.0);
        assert_eq!(p.speed, 2.2);
        assert_eq!(p.spawn_interval, 120);
        assert_eq!(p.gravity, 0.28);
        assert_eq!(p.thrust_impulse, -5.2);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Cosmic).unwrap();
        assert_eq!(json, "\"cosmic\"");
    }
}

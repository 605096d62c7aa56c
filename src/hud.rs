//! HUD text projection
//!
//! Everything a presentation layer shows as text is derived here from a
//! `Snapshot` (plus the most recent slot spin). Nothing is stored; call
//! `HudView::project` every frame or whenever the snapshot changes.

use serde::Serialize;

use crate::sim::{RunState, SlotSpin, Snapshot};

const TITLE: &str = "Moon Hopper";
const CRASH_TITLE: &str = "Cosmic Crash!";

/// Text for the score panel, overlay and buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub score: String,
    pub best: String,
    pub last: String,
    /// Active mutator, queued mutator, or "None"
    pub mutator: String,
    /// Overlay shown while not running
    pub show_overlay: bool,
    pub title: &'static str,
    pub subtitle: String,
    pub start_label: &'static str,
    pub spin_label: &'static str,
    pub spin_enabled: bool,
    /// Reel glyphs of the last spin, blank before the first
    pub reels: [&'static str; 3],
}

impl HudView {
    pub fn project(snapshot: &Snapshot, last_spin: Option<&SlotSpin>) -> Self {
        let mutator = match (snapshot.active_mutator, snapshot.pending_mutator) {
            (Some(active), _) => active.label().to_owned(),
            (None, Some(pending)) => format!("Next: {}", pending.label()),
            (None, None) => "None".to_owned(),
        };

        let (title, subtitle) = match snapshot.phase {
            RunState::Idle => (TITLE, "Press Start to launch".to_owned()),
            RunState::Running => (TITLE, "Tap / Click / Space".to_owned()),
            RunState::Crashed => match snapshot.pending_mutator {
                // Already spun for this crash
                Some(pending) if !snapshot.spin_available => {
                    (CRASH_TITLE, format!("Next run: {}", pending.label()))
                }
                _ => (CRASH_TITLE, "Spin the slots for a mutator".to_owned()),
            },
        };

        let start_label = match snapshot.phase {
            RunState::Idle => "Start",
            RunState::Running => "Running",
            RunState::Crashed => "Retry",
        };

        let spin_label = match (snapshot.phase, snapshot.spin_available) {
            (RunState::Crashed, true) => "Spin",
            (RunState::Crashed, false) => "Spun",
            _ => "Spin (Game Over)",
        };

        let reels = last_spin.map_or(["", "", ""], |spin| {
            spin.reels.map(|reel| reel.reel_glyph())
        });

        Self {
            score: snapshot.score.to_string(),
            best: snapshot.best.to_string(),
            last: snapshot.last.to_string(),
            mutator,
            show_overlay: snapshot.phase != RunState::Running,
            title,
            subtitle,
            start_label,
            spin_label,
            spin_enabled: snapshot.phase == RunState::Crashed && snapshot.spin_available,
            reels,
        }
    }
}

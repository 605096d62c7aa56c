//! Per-frame simulation step and lifecycle transitions
//!
//! Inputs arrive between frames as `Command`s and are applied, in order, at the
//! start of the next tick, so a transition never lands mid-frame.

use glam::Vec2;

use super::collision::collides;
use super::mutator::{Mutator, SlotSpin};
use super::profile::Difficulty;
use super::state::{RunState, SimulationState};
use crate::consts::CRASH_BURST_COUNT;

/// Player intent queued for the next tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pointer-down / space: start, thrust, or reset depending on state
    Flap,
    /// Start/Retry control: starts a run, resetting first after a crash
    Start,
    /// Back to idle
    Reset,
    /// Spin the slots for the next run's mutator
    Spin,
    /// Switch preset by name; unknown names are ignored
    ChangeDifficulty(String),
}

/// Facts reported by a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started { mutator: Option<Mutator> },
    Flapped,
    Scored { score: u32 },
    Crashed { score: u32, best: u32, new_best: bool },
    /// Crash burst from the Explosions mutator
    Exploded { at: Vec2, particles: usize },
    Spun(SlotSpin),
    Reset,
    DifficultyChanged(Difficulty),
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimulationState, commands: &[Command]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for command in commands {
        apply_command(state, command, &mut events);
    }

    let frame = state.clock.step();

    // Particles keep animating after the run ends
    state.particles.advance();

    if state.phase != RunState::Running {
        return events;
    }

    state.body.integrate();

    if state.obstacles.maybe_spawn(frame, &mut state.rng) {
        log::debug!("Frame {}: spawned obstacle ({} live)", frame, state.obstacles.len());
    }
    state.obstacles.advance();

    let crossed = state.obstacles.score_crossings(state.body.x);
    for _ in 0..crossed {
        state.score += 1;
        events.push(GameEvent::Scored { score: state.score });
    }

    if collides(&state.body, &state.obstacles, &state.world) {
        crash(state, &mut events);
    }

    events
}

fn apply_command(state: &mut SimulationState, command: &Command, events: &mut Vec<GameEvent>) {
    match command {
        Command::Flap => match state.phase {
            RunState::Idle => {
                start_run(state, events);
                flap(state, events);
            }
            RunState::Running => flap(state, events),
            // Starting again takes a second, separate input
            RunState::Crashed => reset_run(state, events),
        },
        Command::Start => match state.phase {
            RunState::Idle => start_run(state, events),
            RunState::Crashed => {
                reset_run(state, events);
                start_run(state, events);
            }
            RunState::Running => {}
        },
        Command::Reset => reset_run(state, events),
        Command::Spin => spin_slots(state, events),
        Command::ChangeDifficulty(name) => match Difficulty::from_str(name) {
            Some(difficulty) => {
                state.difficulty = difficulty;
                reset_run(state, events);
                log::info!("Difficulty set to {}", difficulty);
                events.push(GameEvent::DifficultyChanged(difficulty));
            }
            None => {
                log::warn!(
                    "Unknown difficulty {:?}, keeping {}",
                    name,
                    state.difficulty
                );
            }
        },
    }
}

fn start_run(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    if let Some(mutator) = state.pending_mutator.take() {
        state.active_mutator = Some(mutator);
    }
    state.apply_difficulty();
    state.clock.reset();
    state.phase = RunState::Running;

    log::info!(
        "Run started ({}, mutator: {})",
        state.difficulty,
        state.active_mutator.map_or("none", |m| m.label())
    );
    events.push(GameEvent::Started {
        mutator: state.active_mutator,
    });
}

fn flap(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let reversed = state.controls_reversed();
    state.body.apply_thrust(reversed);
    events.push(GameEvent::Flapped);
}

fn crash(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.phase = RunState::Crashed;
    state.last = state.score;
    let new_best = state.score > state.best;
    state.best = state.best.max(state.score);
    state.spin_available = true;

    if state.active_mutator == Some(Mutator::Explosions) {
        let at = Vec2::new(state.body.x, state.body.y);
        state
            .particles
            .spawn_burst(at, CRASH_BURST_COUNT, &mut state.rng);
        events.push(GameEvent::Exploded {
            at,
            particles: CRASH_BURST_COUNT,
        });
    }
    state.active_mutator = None;

    log::info!(
        "Crashed with score {} (best {}{})",
        state.score,
        state.best,
        if new_best { ", new best" } else { "" }
    );
    events.push(GameEvent::Crashed {
        score: state.score,
        best: state.best,
        new_best,
    });
}

fn reset_run(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.clock.reset();
    state.score = 0;
    state.phase = RunState::Idle;
    state.active_mutator = None;
    state.spin_available = false;
    state.obstacles.clear();
    state.particles.clear();
    state.body.place(state.world.center_y());
    state.apply_difficulty();
    events.push(GameEvent::Reset);
}

fn spin_slots(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    if state.phase != RunState::Crashed || !state.spin_available {
        log::debug!("Spin ignored: no spin available");
        return;
    }
    state.spin_available = false;

    let result = SlotSpin::roll(&mut state.rng);
    state.pending_mutator = Some(result.winner);
    log::info!(
        "Slots: {} {} {} -> next run: {}",
        result.reels[0].reel_glyph(),
        result.reels[1].reel_glyph(),
        result.reels[2].reel_glyph(),
        result.winner
    );
    events.push(GameEvent::Spun(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::state::World;
    use proptest::prelude::*;

    fn new_state() -> SimulationState {
        SimulationState::new(World::default(), Difficulty::Classic, 0, 12345)
    }

    /// Tick with no input until the run ends
    fn run_until_crash(state: &mut SimulationState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..1000 {
            events.extend(tick(state, &[]));
            if state.phase == RunState::Crashed {
                return events;
            }
        }
        panic!("run never crashed");
    }

    #[test]
    fn test_idle_waits_for_input() {
        let mut state = new_state();
        for _ in 0..10 {
            assert!(tick(&mut state, &[]).is_empty());
        }
        assert_eq!(state.phase, RunState::Idle);
        assert_eq!(state.body.y, 180.0);
        assert_eq!(state.clock.frame(), 10);
    }

    #[test]
    fn test_flap_from_idle_starts_and_thrusts() {
        let mut state = new_state();
        let events = tick(&mut state, &[Command::Flap]);
        assert_eq!(
            events,
            vec![GameEvent::Started { mutator: None }, GameEvent::Flapped]
        );
        assert_eq!(state.phase, RunState::Running);
        assert_eq!(state.clock.frame(), 1);
        assert!((state.body.velocity_y - (-5.2 + 0.28)).abs() < 1e-5);
    }

    #[test]
    fn test_start_does_not_thrust() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        assert_eq!(state.phase, RunState::Running);
        assert!((state.body.velocity_y - 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_fall_to_ground_crashes() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        let events = run_until_crash(&mut state);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Crashed {
                score: 0,
                best: 0,
                new_best: false
            })
        );
        assert!(state.spin_available);
        assert!(state.body.bottom() >= state.world.ground_y());

        // Frozen after the crash
        let y = state.body.y;
        tick(&mut state, &[]);
        assert_eq!(state.body.y, y);
    }

    #[test]
    fn test_flap_after_crash_only_resets() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        run_until_crash(&mut state);

        let events = tick(&mut state, &[Command::Flap]);
        assert_eq!(events, vec![GameEvent::Reset]);
        assert_eq!(state.phase, RunState::Idle);
        assert_eq!(state.body.y, 180.0);
        assert_eq!(state.body.velocity_y, 0.0);
        assert!(!state.spin_available);

        tick(&mut state, &[Command::Flap]);
        assert_eq!(state.phase, RunState::Running);
    }

    #[test]
    fn test_start_after_crash_resets_then_starts() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        run_until_crash(&mut state);
        let events = tick(&mut state, &[Command::Start]);
        assert_eq!(
            events,
            vec![GameEvent::Reset, GameEvent::Started { mutator: None }]
        );
        assert_eq!(state.phase, RunState::Running);
    }

    #[test]
    fn test_scoring_counts_each_obstacle_once() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        // Hold the body still inside a wide-open gap
        state.body.gravity = 0.0;
        state.body.velocity_y = 0.0;
        state.obstacles.push(Obstacle::new(150.0, state.body.y));
        state.obstacles.gap = 200.0;

        let mut scored = Vec::new();
        for _ in 0..60 {
            for event in tick(&mut state, &[]) {
                if let GameEvent::Scored { score } = event {
                    scored.push(score);
                }
            }
        }
        assert_eq!(scored, vec![1]);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, RunState::Running);
    }

    #[test]
    fn test_spin_only_once_per_crash() {
        let mut state = new_state();

        // Not crashed: no-op
        assert!(tick(&mut state, &[Command::Spin]).is_empty());
        assert_eq!(state.pending_mutator, None);

        tick(&mut state, &[Command::Start]);
        run_until_crash(&mut state);

        let events = tick(&mut state, &[Command::Spin]);
        let Some(GameEvent::Spun(result)) = events.first().cloned() else {
            panic!("expected a spin, got {events:?}");
        };
        assert_eq!(state.pending_mutator, Some(result.winner));
        assert!(!state.spin_available);

        // Second spin is silently ignored
        assert!(tick(&mut state, &[Command::Spin]).is_empty());
        assert_eq!(state.pending_mutator, Some(result.winner));
    }

    #[test]
    fn test_pending_survives_reset_and_applies_on_start() {
        let mut state = new_state();
        state.pending_mutator = Some(Mutator::LowGravity);
        tick(&mut state, &[Command::Reset]);
        assert_eq!(state.pending_mutator, Some(Mutator::LowGravity));

        let events = tick(&mut state, &[Command::Start]);
        assert_eq!(
            events,
            vec![GameEvent::Started {
                mutator: Some(Mutator::LowGravity)
            }]
        );
        assert_eq!(state.pending_mutator, None);
        assert!((state.body.gravity - 0.182).abs() < 1e-6);

        // Cleared on crash, gravity restored on the next run
        run_until_crash(&mut state);
        assert_eq!(state.active_mutator, None);
        tick(&mut state, &[Command::Start]);
        assert!((state.body.gravity - 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_reversed_controls_flap_down() {
        let mut state = new_state();
        state.pending_mutator = Some(Mutator::ReversedControls);
        tick(&mut state, &[Command::Flap]);
        assert!((state.body.velocity_y - (5.2 + 0.28)).abs() < 1e-5);
        assert!((state.body.gravity - 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_explosions_crash_burst() {
        let mut state = new_state();
        state.pending_mutator = Some(Mutator::Explosions);
        tick(&mut state, &[Command::Flap]);
        assert!(state.particles.is_empty());

        let events = run_until_crash(&mut state);
        let crash_at = Vec2::new(state.body.x, state.body.y);
        assert!(events.contains(&GameEvent::Exploded {
            at: crash_at,
            particles: 20
        }));
        assert_eq!(state.particles.len(), 20);
        assert!(state.particles.iter().all(|p| p.pos == crash_at));
        assert_eq!(state.active_mutator, None);

        for _ in 0..50 {
            tick(&mut state, &[]);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_no_burst_without_explosions() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        run_until_crash(&mut state);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_difficulty_change_resets() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        state.obstacles.push(Obstacle::new(500.0, 160.0));
        for _ in 0..5 {
            tick(&mut state, &[]);
        }

        let events = tick(&mut state, &[Command::ChangeDifficulty("cosmic".into())]);
        assert_eq!(
            events,
            vec![
                GameEvent::Reset,
                GameEvent::DifficultyChanged(Difficulty::Cosmic)
            ]
        );
        assert_eq!(state.phase, RunState::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.obstacles.gap, 130.0);
        assert_eq!(state.body.gravity, 0.32);
        assert_eq!(state.body.y, 180.0);
    }

    #[test]
    fn test_unknown_difficulty_is_ignored() {
        let mut state = new_state();
        tick(&mut state, &[Command::Start]);
        let before = state.snapshot();
        let events = tick(&mut state, &[Command::ChangeDifficulty("nightmare".into())]);
        assert!(events.is_empty());
        assert_eq!(state.difficulty, Difficulty::Classic);
        assert_eq!(state.phase, RunState::Running);
        assert_eq!(state.snapshot().frame, before.frame + 1);
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut state = new_state();
        let events = tick(&mut state, &[Command::Flap, Command::Reset, Command::Flap]);
        assert_eq!(
            events,
            vec![
                GameEvent::Started { mutator: None },
                GameEvent::Flapped,
                GameEvent::Reset,
                GameEvent::Started { mutator: None },
                GameEvent::Flapped,
            ]
        );
        assert_eq!(state.phase, RunState::Running);
    }

    #[test]
    fn test_reset_mid_run_clears_progress() {
        let mut state = new_state();
        state.best = 9;
        state.last = 4;
        state.pending_mutator = Some(Mutator::LowGravity);
        tick(&mut state, &[Command::Start]);
        assert_eq!(state.active_mutator, Some(Mutator::LowGravity));

        state.pending_mutator = Some(Mutator::Explosions);
        state.score = 3;
        state.obstacles.push(Obstacle::new(400.0, 180.0));
        state
            .particles
            .spawn_burst(Vec2::new(140.0, 180.0), 5, &mut state.rng);
        for _ in 0..10 {
            tick(&mut state, &[]);
        }
        assert_eq!(state.phase, RunState::Running);
        assert!(!state.obstacles.is_empty());
        assert!(!state.particles.is_empty());

        let events = tick(&mut state, &[Command::Reset]);
        assert_eq!(events, vec![GameEvent::Reset]);
        assert_eq!(state.phase, RunState::Idle);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.active_mutator, None);
        assert!(!state.spin_available);
        assert_eq!(state.clock.frame(), 1);
        assert_eq!(state.body.y, 180.0);
        assert_eq!(state.body.velocity_y, 0.0);
        // Aborted runs leave the records alone
        assert_eq!(state.last, 4);
        assert_eq!(state.best, 9);
        assert_eq!(state.pending_mutator, Some(Mutator::Explosions));
        // Low gravity no longer applies
        assert_eq!(state.body.gravity, Difficulty::Classic.profile().gravity);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();

        for frame in 0..2000u32 {
            let commands = if frame % 25 == 0 {
                vec![Command::Flap]
            } else if frame % 301 == 0 {
                vec![Command::Spin, Command::Start]
            } else {
                Vec::new()
            };
            let e1 = tick(&mut state1, &commands);
            let e2 = tick(&mut state2, &commands);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    proptest! {
        #[test]
        fn prop_best_is_running_max(initial in 0u32..100, scores in prop::collection::vec(0u32..200, 1..20)) {
            let mut state = SimulationState::new(World::default(), Difficulty::Classic, initial, 1);
            let mut seen_max = initial;
            let mut previous_best = state.best;
            for score in scores {
                tick(&mut state, &[Command::Start]);
                state.score = score;
                let mut events = Vec::new();
                crash(&mut state, &mut events);
                seen_max = seen_max.max(score);
                prop_assert!(state.best >= previous_best);
                prop_assert_eq!(state.best, seen_max);
                prop_assert_eq!(state.last, score);
                previous_best = state.best;
            }
        }
    }
}

//! Frame driver
//!
//! `Game` is what a host embeds: it owns the simulation state, queues input
//! between frames, converts wall time into fixed steps, persists the best
//! score and settings, and keeps the music sequencer fed.

use crate::audio::{MusicSequencer, NoteSink};
use crate::highscores::BestScore;
use crate::hud::HudView;
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::sim::{
    Command, FixedStep, GameEvent, SimulationState, SlotSpin, Snapshot, World, tick,
};

pub struct Game<S: Storage> {
    state: SimulationState,
    /// Input received since the last executed tick
    queue: Vec<Command>,
    storage: S,
    settings: Settings,
    music: MusicSequencer,
    sink: Box<dyn NoteSink>,
    fixed: FixedStep,
    last_spin: Option<SlotSpin>,
    /// Seconds of host time seen so far
    elapsed: f64,
}

impl<S: Storage> Game<S> {
    /// Load settings and best score from `storage` and park the body at idle
    pub fn new(storage: S, sink: Box<dyn NoteSink>, world: World, seed: u64) -> Self {
        let settings = Settings::load(&storage);
        let best = BestScore::load(&storage);
        let state = SimulationState::new(world, settings.difficulty, best.value, seed);

        let mut music = MusicSequencer::new(settings.music_volume);
        if settings.music_on {
            music.start(0.0);
        }

        log::info!(
            "Moon Hopper ready (seed {}, {}, best {})",
            seed,
            settings.difficulty,
            best.value
        );

        Self {
            state,
            queue: Vec::new(),
            storage,
            settings,
            music,
            sink,
            fixed: FixedStep::default(),
            last_spin: None,
            elapsed: 0.0,
        }
    }

    /// Queue input for the next tick
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Host frame callback: run as many fixed steps as `dt` seconds covers
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        if dt.is_finite() {
            self.elapsed += f64::from(dt.max(0.0));
        }
        let steps = self.fixed.advance(dt);

        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
        }

        self.music.poll(self.elapsed, self.sink.as_mut());
        events
    }

    /// Execute exactly one simulation frame with all queued input
    pub fn step(&mut self) -> Vec<GameEvent> {
        let commands = std::mem::take(&mut self.queue);
        let events = tick(&mut self.state, &commands);
        for event in &events {
            self.handle(event);
        }
        events
    }

    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Crashed {
                best,
                new_best: true,
                ..
            } => BestScore::new(*best).save(&mut self.storage),
            GameEvent::Spun(spin) => self.last_spin = Some(*spin),
            GameEvent::DifficultyChanged(difficulty) => {
                self.settings.difficulty = *difficulty;
                self.settings.save(&mut self.storage);
            }
            _ => {}
        }
    }

    /// Flip background music; the choice is saved
    pub fn toggle_music(&mut self) -> bool {
        let on = self.music.toggle(self.elapsed);
        self.settings.music_on = on;
        self.settings.save(&mut self.storage);
        on
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.settings.set_music_volume(volume);
        self.music.set_volume(self.settings.music_volume);
        self.settings.save(&mut self.storage);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn hud(&self) -> HudView {
        HudView::project(&self.state.snapshot(), self.last_spin.as_ref())
    }

    /// HUD as JSON for hosts that render outside Rust
    pub fn hud_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.hud())
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn music(&self) -> &MusicSequencer {
        &self.music
    }

    pub fn last_spin(&self) -> Option<&SlotSpin> {
        self.last_spin.as_ref()
    }
}

//! JavaScript bindings
//!
//! The page owns the render loop: it calls `frame(dt)` from
//! `requestAnimationFrame`, forwards input, and draws from `hud()` and
//! `snapshot()`.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::audio::WebAudioSink;
use crate::persistence::Storage;
use crate::sim::{Command, World};

#[wasm_bindgen]
pub struct WebGame {
    game: Game<Box<dyn Storage>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a canvas of the given size, backed by LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, floor_height: f32) -> WebGame {
        super::init_logging();
        let seed: u64 = rand::random();
        let game = Game::new(
            super::default_storage(),
            Box::new(WebAudioSink::new()),
            World::new(width, height, floor_height),
            seed,
        );
        WebGame { game }
    }

    pub fn flap(&mut self) {
        self.game.push(Command::Flap);
    }

    pub fn start(&mut self) {
        self.game.push(Command::Start);
    }

    pub fn reset(&mut self) {
        self.game.push(Command::Reset);
    }

    pub fn spin(&mut self) {
        self.game.push(Command::Spin);
    }

    pub fn change_difficulty(&mut self, name: &str) {
        self.game.push(Command::ChangeDifficulty(name.to_owned()));
    }

    /// Returns whether music is now on
    pub fn toggle_music(&mut self) -> bool {
        self.game.toggle_music()
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.game.set_music_volume(volume);
    }

    /// Advance by `dt` seconds of wall time; returns the number of events raised
    pub fn frame(&mut self, dt: f32) -> usize {
        let events = self.game.frame(dt);
        for event in &events {
            log::debug!("{:?}", event);
        }
        events.len()
    }

    pub fn hud(&self) -> Result<String, JsValue> {
        self.game
            .hud_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.game
            .snapshot_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

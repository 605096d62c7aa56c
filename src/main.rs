//! Moon Hopper headless runner
//!
//! Plays the simulation with a simple autopilot and reports what happened.
//! The browser build drives `moon_hopper::Game` from the page instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use moon_hopper::audio::LogSink;
    use moon_hopper::consts::SIM_DT;
    use moon_hopper::platform;
    use moon_hopper::sim::{Command, GameEvent, RunState, SimulationState, World};
    use moon_hopper::Game;

    #[derive(Parser, Debug)]
    #[command(about = "Run the Moon Hopper simulation headless", version)]
    struct Args {
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate (60 per second)
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// Difficulty preset: chill, classic or cosmic
        #[arg(long)]
        difficulty: Option<String>,
        /// Where the best score and settings are kept
        #[arg(long, default_value = ".moon-hopper")]
        data_dir: PathBuf,
        /// Toggle background music (notes are logged at debug level)
        #[arg(long)]
        music: bool,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    }

    /// Gap the autopilot aims for: the next obstacle still ahead, or mid-air
    fn target_y(state: &SimulationState) -> f32 {
        let ground = state.world.ground_y();
        state
            .obstacles
            .next_ahead_of(state.body.x - state.body.radius)
            .map_or(ground / 2.0, |o| o.gap_center_y)
    }

    fn autopilot(state: &SimulationState) -> Option<Command> {
        match state.phase {
            RunState::Idle => Some(Command::Flap),
            RunState::Crashed if state.spin_available => Some(Command::Spin),
            RunState::Crashed => Some(Command::Start),
            RunState::Running => {
                let target = target_y(state);
                let body = &state.body;
                let flap = if state.controls_reversed() {
                    // Flaps push down: use them to stop a climb that overshoots
                    body.y < target - 20.0 && body.velocity_y < 1.0
                } else {
                    body.y > target + 10.0 && body.velocity_y > 0.0
                };
                flap.then_some(Command::Flap)
            }
        }
    }

    pub fn run() {
        platform::init_logging();
        let args = Args::parse();

        let seed = args.seed.unwrap_or_else(rand::random);
        let storage = platform::default_storage(&args.data_dir);
        let mut game = Game::new(storage, Box::new(LogSink::default()), World::default(), seed);

        if let Some(name) = &args.difficulty {
            game.push(Command::ChangeDifficulty(name.clone()));
        }
        if args.music {
            game.toggle_music();
        }

        let mut runs = 0u32;
        let mut scores = Vec::new();
        for _ in 0..args.frames {
            if let Some(command) = autopilot(game.state()) {
                game.push(command);
            }
            for event in game.frame(SIM_DT) {
                match event {
                    GameEvent::Started { mutator } => {
                        runs += 1;
                        log::debug!("Run {} mutator: {:?}", runs, mutator);
                    }
                    GameEvent::Crashed { score, .. } => scores.push(score),
                    GameEvent::Spun(spin) => {
                        let hud = game.hud();
                        log::info!("{} | {}", hud.reels.join(" "), hud.subtitle);
                        log::debug!("Winner: {}", spin.winner);
                    }
                    _ => {}
                }
            }
        }

        let snapshot = game.snapshot();
        log::info!(
            "Seed {}: {} frames, {} runs, scores {:?}, best {}",
            snapshot.seed,
            args.frames,
            runs,
            scores,
            snapshot.best
        );

        if args.json {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Could not encode snapshot: {}", err),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::wasm_start, this is just to satisfy the compiler
}

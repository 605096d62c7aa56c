//! Background music
//!
//! The melody runs as a cooperative repeating task: the host polls it with the
//! current time and each fired note schedules the next one after its own
//! duration. Stopping cancels a token that is checked before every
//! reschedule, so a note already playing is left to finish on its own.

use std::cell::Cell;
use std::rc::Rc;

/// Gain of every melody note before volume scaling
pub const NOTE_GAIN: f32 = 0.08;

/// Shortest reschedule delay, so a zero-length step cannot spin forever
const MIN_DELAY: f64 = 0.001;

/// A single melody step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
}

const fn note(frequency: f32, duration: f32) -> Note {
    Note {
        frequency,
        duration,
    }
}

/// The looping theme
pub const MELODY: [Note; 18] = [
    note(440.0, 0.35),
    note(440.0, 0.35),
    note(440.0, 0.35),
    note(349.23, 0.25),
    note(523.25, 0.35),
    note(440.0, 0.35),
    note(349.23, 0.25),
    note(523.25, 0.35),
    note(440.0, 0.6),
    note(659.25, 0.35),
    note(659.25, 0.35),
    note(659.25, 0.35),
    note(698.46, 0.25),
    note(523.25, 0.35),
    note(415.3, 0.35),
    note(349.23, 0.25),
    note(523.25, 0.35),
    note(440.0, 0.6),
];

/// Where notes go
pub trait NoteSink {
    fn play(&mut self, note: Note, gain: f32);
}

/// Headless sink: logs and counts notes
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl NoteSink for LogSink {
    fn play(&mut self, note: Note, gain: f32) {
        self.played += 1;
        log::debug!(
            "♪ {:.2} Hz for {:.2}s (gain {:.3})",
            note.frequency,
            note.duration,
            gain
        );
    }
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Self-rescheduling one-shot timer chain
#[derive(Debug)]
pub struct RepeatingTask {
    token: CancelToken,
    due_at: f64,
}

impl RepeatingTask {
    pub fn new(first_due: f64, token: CancelToken) -> Self {
        Self {
            token,
            due_at: first_due,
        }
    }

    /// Run every step due at `now`. `run` returns the delay until the next
    /// step. Returns the number of steps fired.
    pub fn poll(&mut self, now: f64, mut run: impl FnMut() -> f64) -> usize {
        let mut fired = 0;
        while !self.token.is_cancelled() && now >= self.due_at {
            let delay = run();
            fired += 1;
            self.due_at += delay.max(MIN_DELAY);
        }
        fired
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn due_at(&self) -> f64 {
        self.due_at
    }
}

/// Plays `MELODY` on a loop
#[derive(Debug)]
pub struct MusicSequencer {
    step: usize,
    volume: f32,
    task: Option<RepeatingTask>,
}

impl Default for MusicSequencer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MusicSequencer {
    pub fn new(volume: f32) -> Self {
        Self {
            step: 0,
            volume: volume.clamp(0.0, 1.0),
            task: None,
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_cancelled())
    }

    /// Start playing; the next poll at or after `now` fires a note
    pub fn start(&mut self, now: f64) {
        if self.is_playing() {
            return;
        }
        log::info!("Music on");
        self.task = Some(RepeatingTask::new(now, CancelToken::new()));
    }

    /// Stop scheduling notes. Returns the token of the stopped chain, if any.
    pub fn stop(&mut self) -> Option<CancelToken> {
        let task = self.task.take()?;
        task.token().cancel();
        log::info!("Music off");
        Some(task.token().clone())
    }

    /// Flip music on/off; returns the new state
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_playing()
    }

    /// Fire every note due at `now`
    pub fn poll(&mut self, now: f64, sink: &mut dyn NoteSink) -> usize {
        let Some(task) = self.task.as_mut() else {
            return 0;
        };
        let step = &mut self.step;
        let gain = NOTE_GAIN * self.volume;
        task.poll(now, || {
            let note = MELODY[*step % MELODY.len()];
            sink.play(note, gain);
            *step += 1;
            f64::from(note.duration)
        })
    }

    /// Melody position (total notes played)
    pub fn step(&self) -> usize {
        self.step
    }
}

/// Square-wave oscillator output through Web Audio
#[cfg(target_arch = "wasm32")]
pub struct WebAudioSink {
    ctx: Option<web_sys::AudioContext>,
}

#[cfg(target_arch = "wasm32")]
impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl WebAudioSink {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - music disabled");
        }
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn create_osc(
        ctx: &web_sys::AudioContext,
        freq: f32,
    ) -> Option<(web_sys::OscillatorNode, web_sys::GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(web_sys::OscillatorType::Square);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

#[cfg(target_arch = "wasm32")]
impl NoteSink for WebAudioSink {
    fn play(&mut self, note: Note, gain: f32) {
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain_node)) = Self::create_osc(ctx, note.frequency) else {
            return;
        };
        gain_node.gain().set_value(gain);
        let t = ctx.current_time();
        osc.start().ok();
        osc.stop_with_when(t + f64::from(note.duration)).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        notes: Vec<(Note, f32)>,
    }

    impl NoteSink for RecordingSink {
        fn play(&mut self, note: Note, gain: f32) {
            self.notes.push((note, gain));
        }
    }

    #[test]
    fn test_first_note_plays_immediately() {
        let mut music = MusicSequencer::default();
        let mut sink = RecordingSink::default();
        music.start(10.0);
        assert_eq!(music.poll(10.0, &mut sink), 1);
        assert_eq!(sink.notes[0].0, MELODY[0]);
        assert!((sink.notes[0].1 - NOTE_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_notes_follow_durations() {
        let mut music = MusicSequencer::default();
        let mut sink = RecordingSink::default();
        music.start(0.0);
        music.poll(0.0, &mut sink);
        // Second note due at 0.35
        assert_eq!(music.poll(0.34, &mut sink), 0);
        assert_eq!(music.poll(0.35, &mut sink), 1);
        // Catch up: notes due at 0.70 and 1.05
        assert_eq!(music.poll(1.1, &mut sink), 2);
        assert_eq!(music.step(), 4);
    }

    #[test]
    fn test_melody_loops() {
        let mut music = MusicSequencer::default();
        let mut sink = RecordingSink::default();
        music.start(0.0);
        let total: f64 = MELODY.iter().map(|n| f64::from(n.duration)).sum();
        music.poll(total + 0.001, &mut sink);
        assert_eq!(sink.notes.len(), MELODY.len() + 1);
        assert_eq!(sink.notes[MELODY.len()].0, MELODY[0]);
    }

    #[test]
    fn test_stop_prevents_reschedule() {
        let mut music = MusicSequencer::default();
        let mut sink = RecordingSink::default();
        music.start(0.0);
        music.poll(0.0, &mut sink);

        let token = music.stop().unwrap();
        assert!(token.is_cancelled());
        assert!(!music.is_playing());
        assert_eq!(music.poll(100.0, &mut sink), 0);
        // The in-flight note was not touched
        assert_eq!(sink.notes.len(), 1);
    }

    #[test]
    fn test_toggle_resumes_melody_position() {
        let mut music = MusicSequencer::new(0.5);
        let mut sink = RecordingSink::default();
        assert!(music.toggle(0.0));
        music.poll(0.0, &mut sink);
        assert!(!music.toggle(0.1));
        assert!(music.toggle(5.0));
        music.poll(5.0, &mut sink);
        assert_eq!(sink.notes[1].0, MELODY[1]);
        assert!((sink.notes[1].1 - NOTE_GAIN * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_external_cancel() {
        let token = CancelToken::new();
        let mut task = RepeatingTask::new(0.0, token.clone());
        let mut runs = 0;
        assert_eq!(task.poll(0.0, || { runs += 1; 1.0 }), 1);
        token.cancel();
        assert_eq!(task.poll(10.0, || { runs += 1; 1.0 }), 0);
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_zero_delay_does_not_hang() {
        let mut task = RepeatingTask::new(0.0, CancelToken::new());
        let fired = task.poll(0.01, || 0.0);
        assert!(fired <= 11);
    }
}

//! Frame driver
//!
//! Owns a run and its best-score store. Each frame clamps the wall-clock
//! delta, ticks the simulation once and hands back a snapshot plus the
//! events of that frame. A new best score is written through the store as
//! soon as the run ends.

use crate::best_score::ScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Output of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

/// A running game bound to a score store
pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    max_frame_dt: f32,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(settings: &Settings, tuning: Tuning, store: S) -> Self {
        let seed = settings.resolve_seed();
        let mut state = GameState::with_config(seed, settings, tuning);
        state.best = store.load_best();
        log::info!("Run started with seed {} (best {})", seed, state.best);
        Self {
            state,
            store,
            max_frame_dt: settings.max_frame_dt,
        }
    }

    /// Advance one frame of `wall_dt` seconds
    pub fn frame(&mut self, input: &TickInput, wall_dt: f32) -> Frame {
        let dt = wall_dt.clamp(0.0, self.max_frame_dt);
        tick(&mut self.state, input, dt);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewBestScore { score } = event {
                if let Err(e) = self.store.store_best(*score) {
                    log::warn!("Could not save best score {}: {}", score, e);
                }
            }
        }

        Frame {
            snapshot: Snapshot::capture(&self.state),
            events,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

//! Simple autopilot
//!
//! Produces intents from the current state: kite away from nearby hostiles,
//! drift toward loose gems, take the first upgrade card and restart after a
//! game over when asked to. Used by the headless runner and soak tests.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Hostiles closer than this push the autopilot away
const DANGER_RADIUS: f32 = 160.0;

/// Steering policy knobs
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Restart automatically after a game over
    pub auto_restart: bool,
}

impl Autopilot {
    pub fn steer(&self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::LevelUp => TickInput {
                choose: Some(0),
                ..Default::default()
            },
            GamePhase::GameOver => TickInput {
                restart: self.auto_restart,
                ..Default::default()
            },
            GamePhase::Paused => TickInput::default(),
            GamePhase::Playing => self.steer_playing(state),
        }
    }

    fn steer_playing(&self, state: &GameState) -> TickInput {
        let me = state.player.pos;
        let mut flee = Vec2::ZERO;

        let hostiles = state
            .enemies
            .iter()
            .map(|e| e.pos)
            .chain(state.boss.as_ref().map(|b| b.pos));
        for pos in hostiles {
            let away = me - pos;
            let d = away.length();
            if d > 0.0 && d < DANGER_RADIUS {
                flee += away / d * (1.0 - d / DANGER_RADIUS);
            }
        }

        let movement = if flee.length_squared() > 1e-4 {
            flee.normalize_or_zero()
        } else {
            // Nothing close: go for the nearest gem, or drift home.
            let goal = state
                .gems
                .iter()
                .map(|g| g.pos)
                .min_by(|a, b| {
                    a.distance_squared(me)
                        .partial_cmp(&b.distance_squared(me))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(state.area.center);
            let to_goal = goal - me;
            if to_goal.length() > 4.0 {
                to_goal.normalize_or_zero()
            } else {
                Vec2::ZERO
            }
        };

        // Burn the dash when something is on top of us
        let cornered = flee.length() > 1.2;
        TickInput {
            movement,
            dash: cornered,
            ..Default::default()
        }
    }
}

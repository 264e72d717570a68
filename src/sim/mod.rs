//! Simulation module
//!
//! All gameplay logic lives here. This module must stay renderer-agnostic:
//! - Caller-owned state (`GameState`), no globals
//! - Seeded RNG only
//! - Stable iteration order (store order, removals preserve it)
//! - Cosmetics are driven from `GameEvent`s, never called inline

pub mod autopilot;
pub mod combat;
pub mod geometry;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use geometry::{PlayArea, circles_overlap};
pub use progression::{CATALOG, Evolution, Progression, UpgradeDefinition, UpgradeId};
pub use snapshot::Snapshot;
pub use state::{Boss, Bullet, Enemy, GameEvent, GamePhase, GameState, Gem, Player};
pub use tick::{TickInput, tick};

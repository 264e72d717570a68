//! Rogue Survivor - an action-survival simulation core
//!
//! Core modules:
//! - `sim`: Simulation (movement, spawning, combat, progression, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Viewport and runner configuration
//! - `best_score`: Best-score persistence
//! - `session`: Frame driver that feeds the simulation and persists results

pub mod best_score;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::{LinearCurve, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest wall-clock step fed to the simulation (stall protection)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Collision radii
    pub const PLAYER_RADIUS: f32 = 22.0;
    pub const ENEMY_RADIUS: f32 = 22.0;
    pub const BOSS_RADIUS: f32 = 44.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const GEM_RADIUS: f32 = 6.0;

    /// Bullets expire after this many seconds
    pub const BULLET_LIFETIME: f32 = 1.6;
    /// Bullets further than this outside the viewport are dropped
    pub const BULLET_BOUNDS_MARGIN: f32 = 60.0;
    /// Random angular jitter applied to every bullet in a volley (radians)
    pub const VOLLEY_JITTER: f32 = 0.02;

    /// Shield charges never exceed this
    pub const MAX_SHIELD: u32 = 3;

    /// Gem pull speed at zero distance (px/s)
    pub const GEM_PULL_SPEED: f32 = 700.0;
    /// Extra slack added to the pickup distance
    pub const GEM_PICKUP_MARGIN: f32 = 4.0;

    /// Enemy kill payout
    pub const ENEMY_KILL_SCORE: f32 = 10.0;
    pub const ENEMY_GEM_BASE_XP: f32 = 7.0;
    pub const ENEMY_GEM_XP_PER_SEC: f32 = 0.08;
    pub const ENEMY_GEM_XP_BONUS_CAP: f32 = 12.0;

    /// Boss kill payout
    pub const BOSS_KILL_SCORE: f32 = 500.0;
    pub const BOSS_GEM_COUNT: usize = 18;
    pub const BOSS_GEM_XP: f32 = 22.0;
    pub const BOSS_GEM_SCATTER: f32 = 18.0;

    /// Score trickle while alive (per second)
    pub const PASSIVE_SCORE_PER_SEC: f32 = 4.0;

    /// Spawned enemies start at this fraction of the way to the area edge
    pub const SPAWN_EDGE_PUSH: f32 = 0.97;
    /// Rejection-sampling attempts before falling back to the area center
    pub const SPAWN_SAMPLE_ATTEMPTS: u32 = 60;

    /// Experience curve
    pub const XP_START_NEED: u32 = 30;
    pub const XP_NEED_GROWTH: f32 = 1.22;
    pub const XP_NEED_STEP: f32 = 8.0;

    /// Number of upgrade cards offered per level
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Length of `v`, treating zero as one so it can be used as a divisor
#[inline]
pub fn length_or_unit(v: Vec2) -> f32 {
    let d = v.length();
    if d > 0.0 { d } else { 1.0 }
}

/// Heading angle of a vector (radians)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector for a heading angle
#[inline]
pub fn from_heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

//! Data-driven game balance
//!
//! Every difficulty curve and base stat lives here so a balance pass can be
//! loaded from JSON without touching simulation code. `Tuning::default()` is
//! the shipped balance.

use serde::{Deserialize, Serialize};

/// `base + per_second * t`, evaluated at elapsed run time `t` (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCurve {
    pub base: f32,
    pub per_second: f32,
}

impl LinearCurve {
    pub const fn new(base: f32, per_second: f32) -> Self {
        Self { base, per_second }
    }

    /// Value at time `t`. Negative time is treated as the start of the run.
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        self.base + self.per_second * t.max(0.0)
    }
}

/// Stat curves for one kind of hostile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostileCurves {
    pub hp: LinearCurve,
    pub speed: LinearCurve,
    /// Contact damage per second
    pub damage: LinearCurve,
}

/// Player stats at the start of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBase {
    pub hp_max: f32,
    pub speed: f32,
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_count: u32,
    pub bullet_spread: f32,
    pub pierce: u32,
    pub magnet: f32,
    pub dash_cooldown: f32,
    pub dash_power: f32,
    pub shield_cooldown: f32,
}

impl Default for PlayerBase {
    fn default() -> Self {
        Self {
            hp_max: 100.0,
            speed: 220.0,
            fire_rate: 2.6,
            bullet_speed: 520.0,
            bullet_damage: 12.0,
            bullet_count: 1,
            bullet_spread: 0.18,
            pierce: 0,
            magnet: 80.0,
            dash_cooldown: 1.2,
            dash_power: 220.0,
            shield_cooldown: 10.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Enemy spawns per second
    pub spawn_rate: LinearCurve,
    pub enemy: HostileCurves,
    pub boss: HostileCurves,
    /// Seconds of run time between boss thresholds
    pub boss_interval: f32,
    pub player: PlayerBase,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_rate: LinearCurve::new(1.1, 0.03),
            enemy: HostileCurves {
                hp: LinearCurve::new(26.0, 0.70),
                speed: LinearCurve::new(65.0, 0.20),
                damage: LinearCurve::new(10.0, 0.05),
            },
            boss: HostileCurves {
                hp: LinearCurve::new(980.0, 9.0),
                speed: LinearCurve::new(78.0, 0.09),
                damage: LinearCurve::new(22.0, 0.04),
            },
            boss_interval: 120.0,
            player: PlayerBase::default(),
        }
    }
}

impl Tuning {
    /// Parse a balance table, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a balance table from disk, or the shipped balance if unreadable
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

//! Game state and core simulation types
//!
//! Everything a run owns lives in `GameState`: the entity stores, timers,
//! progression, score and the RNG. There are no globals, so any number of
//! runs can be simulated side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::PlayArea;
use super::progression::{Evolution, Progression, UpgradeId};
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::{PlayerBase, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Waiting for an upgrade choice
    LevelUp,
    /// Run ended
    GameOver,
}

/// Discrete gameplay events for audio/cosmetic collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { pos: Vec2 },
    BossSpawned { pos: Vec2 },
    BossKilled { pos: Vec2 },
    /// Shield charge consumed instead of taking damage
    ShieldAbsorbed,
    Dashed { from: Vec2, to: Vec2 },
    LevelUpStarted { level: u32 },
    UpgradeApplied { id: UpgradeId },
    EvolutionUnlocked { evolution: Evolution, pos: Vec2 },
    GameOver { score: u64 },
    NewBestScore { score: u64 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub hp: f32,
    pub hp_max: f32,
    /// Movement speed (px/s)
    pub speed: f32,
    /// Volleys per second
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_count: u32,
    /// Angle between adjacent bullets of a volley (radians)
    pub bullet_spread: f32,
    pub pierce: u32,
    /// Gem pull radius
    pub magnet: f32,
    pub dash_cooldown: f32,
    /// Seconds until the next dash is allowed (0 = ready)
    pub dash_ready: f32,
    pub dash_power: f32,
    /// Shield charges (0..=MAX_SHIELD)
    pub shield: u32,
    /// Seconds per regenerated charge
    pub shield_cooldown: f32,
    /// Regen progress toward the next charge
    pub shield_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2, base: &PlayerBase) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            facing: 1.0,
            hp: base.hp_max,
            hp_max: base.hp_max,
            speed: base.speed,
            fire_rate: base.fire_rate,
            bullet_speed: base.bullet_speed,
            bullet_damage: base.bullet_damage,
            bullet_count: base.bullet_count,
            bullet_spread: base.bullet_spread,
            pierce: base.pierce,
            magnet: base.magnet,
            dash_cooldown: base.dash_cooldown,
            dash_ready: 0.0,
            dash_power: base.dash_power,
            shield: 0,
            shield_cooldown: base.shield_cooldown,
            shield_timer: 0.0,
        }
    }

    /// Add shield charges, never beyond the hard cap
    pub fn grant_shield(&mut self, charges: u32) {
        self.shield = (self.shield + charges).min(MAX_SHIELD);
    }

    /// Heal without exceeding max hp
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.hp_max);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub facing: f32,
    pub hp: f32,
    pub speed: f32,
    /// Contact damage per second
    pub damage: f32,
}

/// The boss (at most one alive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: f32,
    pub hp: f32,
    pub hp_max: f32,
    pub speed: f32,
    /// Contact damage per second
    pub damage: f32,
}

impl Boss {
    pub fn hp_fraction(&self) -> f32 {
        (self.hp / self.hp_max).clamp(0.0, 1.0)
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Extra hits this bullet survives
    pub pierce: u32,
    /// Seconds left before expiry
    pub life: f32,
    /// Visual rotation only
    pub heading: f32,
}

/// An experience gem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub xp: f32,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// RNG for spawns, upgrade rolls and jitter
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub area: PlayArea,
    pub phase: GamePhase,
    /// Simulated run time (seconds, only advances while playing)
    pub elapsed: f32,
    /// Fractional score; reported floored
    pub score: f32,
    /// Best score seen so far (survives restarts)
    pub best: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub gems: Vec<Gem>,
    pub progression: Progression,
    /// Spawn debt (seconds)
    pub spawn_timer: f32,
    /// Autofire debt (seconds)
    pub fire_timer: f32,
    /// Run time at which the next boss may appear
    pub next_boss_at: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the default viewport and balance
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, &Settings::default(), Tuning::default())
    }

    /// Create a new run for the given settings and balance
    pub fn with_config(seed: u64, settings: &Settings, tuning: Tuning) -> Self {
        let area = PlayArea::from_viewport(settings.viewport_width, settings.viewport_height);
        Self::with_rng(Pcg32::seed_from_u64(seed), area, tuning)
    }

    /// Create a new run with an injected RNG
    pub fn with_rng(rng: Pcg32, area: PlayArea, tuning: Tuning) -> Self {
        let player = Player::new(area.center, &tuning.player);
        let next_boss_at = tuning.boss_interval;
        let mut state = Self {
            rng,
            tuning,
            area,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            score: 0.0,
            best: 0,
            player,
            enemies: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            gems: Vec::new(),
            progression: Progression::new(),
            spawn_timer: 0.0,
            fire_timer: 0.0,
            next_boss_at,
            events: Vec::new(),
            next_id: 1,
        };
        state.player.pos = state.spawn_point();
        state
    }

    /// Start over: fresh entities, stats and progression. Best score and the
    /// RNG stream carry over.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.score = 0.0;
        self.enemies.clear();
        self.bullets.clear();
        self.gems.clear();
        self.boss = None;
        self.progression = Progression::new();
        self.spawn_timer = 0.0;
        self.fire_timer = 0.0;
        self.next_boss_at = self.tuning.boss_interval;
        self.next_id = 1;

        let pos = self.spawn_point();
        self.player = Player::new(pos, &self.tuning.player);
        log::info!("Run restarted (best {})", self.best);
    }

    /// Random player start inside the padded area
    fn spawn_point(&mut self) -> Vec2 {
        let p = self.area.random_point(PLAYER_RADIUS, &mut self.rng);
        self.area.clamp(p, PLAYER_RADIUS)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Score as shown to the player
    pub fn score_floor(&self) -> u64 {
        self.score.max(0.0) as u64
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter the terminal phase and settle the best score
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.hp = self.player.hp.max(0.0);
        self.phase = GamePhase::GameOver;
        self.progression.choices = None;

        let score = self.score_floor();
        log::info!(
            "Game over at {:.1}s, level {}, score {}",
            self.elapsed,
            self.progression.level,
            score
        );
        self.events.push(GameEvent::GameOver { score });
        if score > self.best {
            self.best = score;
            self.events.push(GameEvent::NewBestScore { score });
        }
    }
}

//! Read-only view of a run for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::progression::UpgradeId;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: f32,
    pub hp: f32,
    pub hp_max: f32,
    pub shield: u32,
    /// 0 when the dash is ready
    pub dash_ready: f32,
    pub dash_cooldown: f32,
    pub speed: f32,
    /// Volleys per second
    pub fire_rate: f32,
    pub bullet_count: u32,
    pub bullet_damage: f32,
    pub bullet_speed: f32,
    pub pierce: u32,
    /// Gem pull radius
    pub magnet: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: f32,
    /// For the boss health bar
    pub hp_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
    pub heading: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemView {
    pub pos: Vec2,
    pub radius: f32,
}

/// An upgrade card on offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCard {
    pub id: UpgradeId,
    pub title: String,
    pub description: String,
}

/// Everything a frame needs to draw the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    pub level: u32,
    pub xp_fraction: f32,
    pub score: u64,
    pub best: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub bullets: Vec<BulletView>,
    pub gems: Vec<GemView>,
    /// Present only while leveling up
    pub choices: Option<Vec<UpgradeCard>>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            phase: state.phase,
            elapsed: state.elapsed,
            level: state.progression.level,
            xp_fraction: state.progression.xp_fraction(),
            score: state.score_floor(),
            best: state.best.max(state.score_floor()),
            player: PlayerView {
                pos: p.pos,
                radius: p.radius,
                facing: p.facing,
                hp: p.hp,
                hp_max: p.hp_max,
                shield: p.shield,
                dash_ready: p.dash_ready,
                dash_cooldown: p.dash_cooldown,
                speed: p.speed,
                fire_rate: p.fire_rate,
                bullet_count: p.bullet_count,
                bullet_damage: p.bullet_damage,
                bullet_speed: p.bullet_speed,
                pierce: p.pierce,
                magnet: p.magnet,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    radius: e.radius,
                    facing: e.facing,
                })
                .collect(),
            boss: state.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                radius: b.radius,
                facing: b.facing,
                hp_fraction: b.hp_fraction(),
            }),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                    heading: b.heading,
                })
                .collect(),
            gems: state
                .gems
                .iter()
                .map(|g| GemView {
                    pos: g.pos,
                    radius: g.radius,
                })
                .collect(),
            choices: state.progression.choices.as_ref().map(|ids| {
                ids.iter()
                    .map(|id| {
                        let def = id.definition();
                        UpgradeCard {
                            id: *id,
                            title: def.title.to_string(),
                            description: def.description.to_string(),
                        }
                    })
                    .collect()
            }),
        }
    }

    /// HP bar fill in [0, 1]
    pub fn hp_fraction(&self) -> f32 {
        if self.player.hp_max <= 0.0 {
            return 0.0;
        }
        (self.player.hp / self.player.hp_max).clamp(0.0, 1.0)
    }

    /// Run time as `m:ss`
    pub fn clock(&self) -> String {
        let secs = self.elapsed.max(0.0) as u32;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

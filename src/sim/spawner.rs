//! Time-scaled enemy and boss spawning
//!
//! Spawn rate and hostile stats are linear in elapsed run time (see
//! `Tuning`). A spawn accumulator makes the spawn count independent of the
//! frame rate.

use glam::Vec2;

use super::state::{Boss, Enemy, GameEvent, GameState};
use crate::consts::{BOSS_RADIUS, ENEMY_RADIUS};

/// Enemy stats for a given elapsed run time
pub fn enemy_stats(state: &GameState, t: f32) -> (f32, f32, f32) {
    let curves = &state.tuning.enemy;
    (curves.hp.at(t), curves.speed.at(t), curves.damage.at(t))
}

/// Advance the spawn accumulator and create every enemy that is due
pub fn spawn_enemies(state: &mut GameState, dt: f32) -> usize {
    let rate = state.tuning.spawn_rate.at(state.elapsed);
    if rate <= 0.0 {
        return 0;
    }
    let interval = 1.0 / rate;

    state.spawn_timer += dt;
    let mut spawned = 0;
    while state.spawn_timer >= interval {
        state.spawn_timer -= interval;
        spawn_enemy(state);
        spawned += 1;
    }
    spawned
}

/// Create one enemy near the rim of the play area
pub fn spawn_enemy(state: &mut GameState) {
    let (hp, speed, damage) = enemy_stats(state, state.elapsed);
    let sample = state.area.random_point(ENEMY_RADIUS, &mut state.rng);
    let pos = state.area.push_to_edge(sample);

    let id = state.next_entity_id();
    log::debug!(
        "Enemy {} at ({:.0}, {:.0}) hp={:.1} speed={:.1} dmg={:.2}",
        id,
        pos.x,
        pos.y,
        hp,
        speed,
        damage
    );
    state.enemies.push(Enemy {
        id,
        pos,
        radius: ENEMY_RADIUS,
        facing: -1.0,
        hp,
        speed,
        damage,
    });
}

/// Spawn the boss when its threshold has passed and none is alive.
///
/// The threshold only moves forward when a boss actually spawns, and always
/// by exactly one interval.
pub fn try_spawn_boss(state: &mut GameState) -> bool {
    if state.boss.is_some() || state.elapsed < state.next_boss_at {
        return false;
    }

    let t = state.elapsed;
    let curves = state.tuning.boss;
    let pos: Vec2 = state.area.random_point(BOSS_RADIUS, &mut state.rng);
    let hp_max = curves.hp.at(t);

    state.boss = Some(Boss {
        pos,
        radius: BOSS_RADIUS,
        facing: -1.0,
        hp: hp_max,
        hp_max,
        speed: curves.speed.at(t),
        damage: curves.damage.at(t),
    });
    state.next_boss_at += state.tuning.boss_interval;
    state.events.push(GameEvent::BossSpawned { pos });
    log::info!(
        "Boss spawned at {:.1}s with {:.0} hp (next threshold {:.0}s)",
        t,
        hp_max,
        state.next_boss_at
    );
    true
}

//! Targeting, autofire, collisions and damage
//!
//! All collision tests are circle-circle on squared distances. Entity counts
//! stay in the low hundreds, so every pass is a plain scan.

use glam::Vec2;
use rand::Rng;

use super::geometry::circles_overlap;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Gem};
use crate::consts::*;
use crate::{from_heading, heading, length_or_unit};

/// Position of the autofire target.
///
/// The boss is checked first and only loses to an enemy that is strictly
/// closer; otherwise the nearest enemy wins.
pub fn nearest_target(state: &GameState) -> Option<Vec2> {
    let origin = state.player.pos;
    let mut best: Option<(Vec2, f32)> = state
        .boss
        .as_ref()
        .map(|b| (b.pos, b.pos.distance_squared(origin)));

    for e in &state.enemies {
        let d = e.pos.distance_squared(origin);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((e.pos, d));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Advance the autofire accumulator and emit every volley that is due.
///
/// A volley with no target still consumes its interval; the remaining
/// debt is kept for the next tick.
pub fn fire(state: &mut GameState, dt: f32) -> usize {
    if state.player.fire_rate <= 0.0 {
        return 0;
    }
    let interval = 1.0 / state.player.fire_rate;
    state.fire_timer += dt;

    let mut volleys = 0;
    while state.fire_timer >= interval {
        state.fire_timer -= interval;
        let Some(target) = nearest_target(state) else {
            return volleys;
        };
        emit_volley(state, target);
        volleys += 1;
    }
    volleys
}

/// Fan `bullet_count` bullets around the aim angle toward `target`
pub fn emit_volley(state: &mut GameState, target: Vec2) {
    let origin = state.player.pos;
    let aim = heading(target - origin);
    let n = state.player.bullet_count;
    let spread = state.player.bullet_spread;
    let start = aim - spread * (n.saturating_sub(1)) as f32 / 2.0;

    for i in 0..n {
        let jitter = state.rng.random_range(-VOLLEY_JITTER..=VOLLEY_JITTER);
        let angle = start + i as f32 * spread + jitter;
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: origin,
            vel: from_heading(angle) * state.player.bullet_speed,
            radius: BULLET_RADIUS,
            damage: state.player.bullet_damage,
            pierce: state.player.pierce,
            life: BULLET_LIFETIME,
            heading: angle,
        });
    }
    log::debug!("Volley of {} toward ({:.0}, {:.0})", n, target.x, target.y);
}

/// Move bullets, age them and drop expired or escaped ones
pub fn move_bullets(state: &mut GameState, dt: f32) {
    let area = state.area;
    state.bullets.retain_mut(|b| {
        b.pos += b.vel * dt;
        b.life -= dt;
        b.life > 0.0 && !area.out_of_bounds(b.pos)
    });
}

/// Apply one contact-damage application to the player.
///
/// A shield charge swallows the whole application regardless of its size.
pub fn damage_player(state: &mut GameState, amount: f32) {
    if amount <= 0.0 || state.phase == GamePhase::GameOver {
        return;
    }
    let player = &mut state.player;
    if player.shield > 0 {
        player.shield -= 1;
        state.events.push(GameEvent::ShieldAbsorbed);
        return;
    }
    player.hp = (player.hp - amount).max(0.0);
    if player.is_dead() {
        state.game_over();
    }
}

/// Walk enemies and the boss toward the player, keep them in the area and
/// apply contact damage (damage per second scaled by `dt`).
///
/// Contact is judged on the distance before this tick's step.
pub fn move_hostiles(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    let reach = state.player.radius;
    let area = state.area;
    let mut contacts = Vec::new();

    for e in &mut state.enemies {
        let delta = target - e.pos;
        let d = length_or_unit(delta);
        if delta.x.abs() > 0.01 {
            e.facing = delta.x.signum();
        }
        e.pos = area.clamp(e.pos + delta / d * e.speed * dt, e.radius);
        if d < e.radius + reach {
            contacts.push(e.damage * dt);
        }
    }

    if let Some(boss) = &mut state.boss {
        let delta = target - boss.pos;
        let d = length_or_unit(delta);
        if delta.x.abs() > 0.01 {
            boss.facing = delta.x.signum();
        }
        boss.pos = area.clamp(boss.pos + delta / d * boss.speed * dt, boss.radius);
        if d < boss.radius + reach {
            contacts.push(boss.damage * dt);
        }
    }

    for amount in contacts {
        damage_player(state, amount);
    }
}

/// Consume a hit on a bullet; returns whether it survives
#[inline]
fn spend_pierce(bullet: &mut Bullet) -> bool {
    if bullet.pierce > 0 {
        bullet.pierce -= 1;
        true
    } else {
        false
    }
}

/// Bullets against the boss. Piercing bullets stay alive and may hit again
/// on a later tick.
pub fn resolve_boss_hits(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let mut killed = false;
    state.bullets.retain_mut(|b| {
        if killed || !circles_overlap(boss.pos, boss.radius, b.pos, b.radius) {
            return true;
        }
        boss.hp -= b.damage;
        if boss.hp <= 0.0 {
            killed = true;
        }
        spend_pierce(b)
    });

    if !killed {
        return;
    }
    let Some(boss) = state.boss.take() else {
        return;
    };
    for _ in 0..BOSS_GEM_COUNT {
        let offset = Vec2::new(
            state.rng.random_range(-BOSS_GEM_SCATTER..BOSS_GEM_SCATTER),
            state.rng.random_range(-BOSS_GEM_SCATTER..BOSS_GEM_SCATTER),
        );
        drop_gem(state, boss.pos + offset, BOSS_GEM_XP);
    }
    state.score += BOSS_KILL_SCORE;
    state.events.push(GameEvent::BossKilled { pos: boss.pos });
    log::info!("Boss defeated at {:.1}s", state.elapsed);
}

/// XP carried by a regular enemy's gem at run time `t`
pub fn enemy_gem_xp(t: f32) -> f32 {
    ENEMY_GEM_BASE_XP + (t.max(0.0) * ENEMY_GEM_XP_PER_SEC).min(ENEMY_GEM_XP_BONUS_CAP)
}

/// Bullets against enemies: each bullet hits at most one enemy per tick,
/// the first overlapping one in store order.
pub fn resolve_enemy_hits(state: &mut GameState) {
    let mut deaths = Vec::new();
    let enemies = &mut state.enemies;

    state.bullets.retain_mut(|b| {
        let Some(e) = enemies
            .iter_mut()
            .find(|e| e.hp > 0.0 && circles_overlap(e.pos, e.radius, b.pos, b.radius))
        else {
            return true;
        };
        e.hp -= b.damage;
        if e.hp <= 0.0 {
            deaths.push(e.pos);
        }
        spend_pierce(b)
    });

    if deaths.is_empty() {
        return;
    }
    state.enemies.retain(|e| e.hp > 0.0);

    let xp = enemy_gem_xp(state.elapsed);
    for pos in deaths {
        drop_gem(state, pos, xp);
        state.score += ENEMY_KILL_SCORE;
        state.events.push(GameEvent::EnemyKilled { pos });
    }
}

fn drop_gem(state: &mut GameState, pos: Vec2, xp: f32) {
    let id = state.next_entity_id();
    state.gems.push(Gem {
        id,
        pos,
        radius: GEM_RADIUS,
        xp,
    });
}

/// Pull gems inside the magnet radius and collect the ones touching the
/// player. Returns the XP collected (already added to the score).
pub fn collect_gems(state: &mut GameState, dt: f32) -> f32 {
    let player = &state.player;
    let mut collected = 0.0;

    state.gems.retain_mut(|g| {
        let delta = player.pos - g.pos;
        let d = length_or_unit(delta);
        if d < player.magnet {
            let pull = (1.0 - d / player.magnet) * GEM_PULL_SPEED;
            g.pos += delta / d * pull * dt;
        }
        if d < player.radius + g.radius + GEM_PICKUP_MARGIN {
            collected += g.xp;
            false
        } else {
            true
        }
    });

    state.score += collected;
    collected
}

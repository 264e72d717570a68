//! Simulation tick
//!
//! One call advances a run by `dt` seconds: intents are gated by the current
//! phase, then movement, spawning, combat and progression run in a fixed
//! order. Events are appended to `GameState::events` for the caller to drain.

use glam::Vec2;

use super::combat;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::PASSIVE_SCORE_PER_SEC;

/// Player intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent; axes in [-1, 1], summed from any number of sources.
    /// Normalized before use.
    pub movement: Vec2,
    /// Dash along the movement intent
    pub dash: bool,
    /// Pause toggle
    pub pause: bool,
    /// Upgrade card index while leveling up
    pub choose: Option<usize>,
    /// Start a fresh run
    pub restart: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Restart is honoured from every phase
    if input.restart {
        state.restart();
    }

    if input.pause {
        toggle_pause(state);
    }

    if let Some(index) = input.choose {
        choose_upgrade(state, index);
    }

    // Only active play advances time
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.dash {
        try_dash(state, input.movement);
    }

    state.elapsed += dt;
    step(state, input.movement, dt);
}

/// Flip between playing and paused; other phases ignore the request
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        other => {
            log::debug!("Pause ignored in {:?}", other);
            other
        }
    };
}

/// Apply the upgrade card at `index`. Out-of-range indices and requests
/// outside the level-up phase change nothing.
pub fn choose_upgrade(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::LevelUp {
        return false;
    }
    let Some((id, evolutions)) = state.progression.choose(index, &mut state.player) else {
        log::warn!("Ignoring upgrade choice {}", index);
        return false;
    };

    log::info!("Upgrade applied: {}", id.definition().title);
    state.events.push(GameEvent::UpgradeApplied { id });
    for evolution in evolutions {
        log::info!("Evolution unlocked: {:?}", evolution);
        state.events.push(GameEvent::EvolutionUnlocked {
            evolution,
            pos: state.player.pos,
        });
    }
    state.phase = GamePhase::Playing;
    true
}

/// Blink `dash_power` along the movement intent if the dash is ready
pub fn try_dash(state: &mut GameState, intent: Vec2) -> bool {
    if state.phase != GamePhase::Playing || state.player.dash_ready > 0.0 {
        return false;
    }
    let m = intent.length();
    if m < 0.01 {
        return false;
    }

    let player = &mut state.player;
    let from = player.pos;
    player.pos = state
        .area
        .clamp(from + intent / m * player.dash_power, player.radius);
    if intent.x.abs() > 0.05 {
        player.facing = intent.x.signum();
    }
    player.dash_ready = player.dash_cooldown;
    let to = player.pos;
    state.events.push(GameEvent::Dashed { from, to });
    true
}

/// Walk the player along the (normalized) intent and keep it in the area
pub fn move_player(state: &mut GameState, intent: Vec2, dt: f32) {
    let m = intent.length();
    if m <= 0.001 {
        return;
    }
    let player = &mut state.player;
    if intent.x.abs() > 0.05 {
        player.facing = intent.x.signum();
    }
    player.pos = state
        .area
        .clamp(player.pos + intent / m * player.speed * dt, player.radius);
}

/// Refill one shield charge per cooldown while below the regen cap
pub fn regen_shield(state: &mut GameState, dt: f32) {
    let cap = state.progression.shield_cap();
    let player = &mut state.player;
    if cap == 0 || player.shield >= cap {
        return;
    }
    player.shield_timer += dt;
    if player.shield_timer >= player.shield_cooldown {
        player.shield_timer = 0.0;
        player.shield += 1;
    }
}

/// Feed XP into progression and open the upgrade offer on level-up
pub fn grant_xp(state: &mut GameState, xp: f32) {
    if xp <= 0.0 {
        return;
    }
    let reached = state.progression.add_xp(xp);
    if reached.is_empty() || state.phase == GamePhase::GameOver {
        return;
    }

    for level in reached {
        log::info!("Level {} reached at {:.1}s", level, state.elapsed);
        state.events.push(GameEvent::LevelUpStarted { level });
    }
    state.progression.roll_choices(&mut state.rng);
    state.phase = GamePhase::LevelUp;
}

/// The body of a playing tick
fn step(state: &mut GameState, movement: Vec2, dt: f32) {
    let player = &mut state.player;
    player.dash_ready = (player.dash_ready - dt).max(0.0);

    regen_shield(state, dt);
    move_player(state, movement, dt);

    spawner::spawn_enemies(state, dt);
    spawner::try_spawn_boss(state);

    combat::fire(state, dt);
    combat::move_bullets(state, dt);
    combat::move_hostiles(state, dt);
    if state.phase == GamePhase::GameOver {
        return;
    }

    combat::resolve_boss_hits(state);
    combat::resolve_enemy_hits(state);

    let xp = combat::collect_gems(state, dt);
    grant_xp(state, xp);

    state.score += dt * PASSIVE_SCORE_PER_SEC;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_RADIUS, MAX_FRAME_DT};
    use crate::sim::progression::UpgradeId;
    use crate::sim::state::{Enemy, Gem};

    /// A run with spawning pushed far into the future
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.tuning.spawn_rate.base = 1e-6;
        state.tuning.spawn_rate.per_second = 0.0;
        state.next_boss_at = f32::MAX;
        state.player.pos = state.area.center;
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, hp: f32, damage: f32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            radius: ENEMY_RADIUS,
            facing: -1.0,
            hp,
            speed: 0.0,
            damage,
        });
    }

    #[test]
    fn test_tick_advances_time_only_while_playing() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), MAX_FRAME_DT);
        assert!((state.elapsed - MAX_FRAME_DT).abs() < 1e-6);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, MAX_FRAME_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.elapsed;
        tick(&mut state, &TickInput::default(), MAX_FRAME_DT);
        assert_eq!(state.elapsed, frozen);

        tick(&mut state, &pause, MAX_FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.elapsed > frozen);
    }

    #[test]
    fn test_pause_ignored_during_levelup_and_gameover() {
        let mut state = quiet_state();
        state.phase = GamePhase::LevelUp;
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::LevelUp);
        state.phase = GamePhase::GameOver;
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_contact_scenario() {
        let mut state = quiet_state();
        let p = state.player.pos;
        add_enemy(&mut state, p + Vec2::new(5.0, 0.0), 1000.0, 10.0);
        state.player.fire_rate = 0.0;
        tick(&mut state, &TickInput::default(), 1.0);
        assert!((state.player.hp - 90.0).abs() < 1e-3);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shield_contact_scenario() {
        let mut state = quiet_state();
        let p = state.player.pos;
        add_enemy(&mut state, p + Vec2::new(5.0, 0.0), 1000.0, 10.0);
        state.player.fire_rate = 0.0;
        state.player.shield = 1;
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.player.hp, 100.0);
        assert_eq!(state.player.shield, 0);
    }

    #[test]
    fn test_death_moves_to_game_over() {
        let mut state = quiet_state();
        let p = state.player.pos;
        add_enemy(&mut state, p, 1000.0, 500.0);
        state.player.fire_rate = 0.0;
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.hp, 0.0);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));

        // Nothing moves after the run ends
        let t = state.elapsed;
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.elapsed, t);
    }

    #[test]
    fn test_gem_pickup_levels_up_and_offers_choices() {
        let mut state = quiet_state();
        let p = state.player.pos;
        state.progression.xp = 25.0;
        state.gems.push(Gem {
            id: 999,
            pos: p,
            radius: 6.0,
            xp: 10.0,
        });
        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.phase, GamePhase::LevelUp);
        assert_eq!(state.progression.level, 2);
        assert_eq!(state.progression.xp_needed, 44);
        assert!((state.progression.xp - 5.0).abs() < 1e-3);
        assert_eq!(state.progression.choices.as_ref().map(Vec::len), Some(3));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelUpStarted { level: 2 })
        );

        // Frozen while choosing
        let t = state.elapsed;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.elapsed, t);
    }

    #[test]
    fn test_bad_choice_keeps_levelup() {
        let mut state = quiet_state();
        grant_xp(&mut state, 30.0);
        assert_eq!(state.phase, GamePhase::LevelUp);
        let input = TickInput {
            choose: Some(7),
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::LevelUp);
        assert!(state.progression.choices.is_some());
    }

    #[test]
    fn test_choice_resumes_play() {
        let mut state = quiet_state();
        grant_xp(&mut state, 30.0);
        let offered = state.progression.choices.clone().unwrap();
        let input = TickInput {
            choose: Some(1),
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.pick_count(offered[1]), 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::UpgradeApplied { id: offered[1] })
        );
    }

    #[test]
    fn test_choice_ignored_outside_levelup() {
        let mut state = quiet_state();
        state.progression.choices = Some(vec![UpgradeId::Damage]);
        assert!(!choose_upgrade(&mut state, 0));
        assert_eq!(state.player.bullet_damage, 12.0);
    }

    #[test]
    fn test_movement_is_normalized() {
        let mut state = quiet_state();
        let start = state.player.pos;
        move_player(&mut state, Vec2::new(1.0, 1.0), 0.01);
        let moved = state.player.pos - start;
        assert!((moved.length() - state.player.speed * 0.01).abs() < 1e-3);

        // Two sources summing past 1 move no faster
        let start = state.player.pos;
        move_player(&mut state, Vec2::new(2.0, 0.0), 0.01);
        assert!(((state.player.pos - start).length() - state.player.speed * 0.01).abs() < 1e-3);
        assert_eq!(state.player.facing, 1.0);

        move_player(&mut state, Vec2::new(-0.5, 0.0), 0.01);
        assert_eq!(state.player.facing, -1.0);
    }

    #[test]
    fn test_dash_cooldown() {
        let mut state = quiet_state();
        assert!(!try_dash(&mut state, Vec2::ZERO));
        assert!(try_dash(&mut state, Vec2::new(1.0, 0.0)));
        assert!((state.player.dash_ready - state.player.dash_cooldown).abs() < 1e-6);
        assert!(!try_dash(&mut state, Vec2::new(1.0, 0.0)));
        assert!(state.area.contains(state.player.pos, state.player.radius));

        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), MAX_FRAME_DT);
        }
        assert_eq!(state.player.dash_ready, 0.0);
        assert!(try_dash(&mut state, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_dash_rejected_when_paused() {
        let mut state = quiet_state();
        state.phase = GamePhase::Paused;
        let start = state.player.pos;
        let input = TickInput {
            dash: true,
            movement: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_shield_regen() {
        let mut state = quiet_state();
        let mut player = state.player.clone();
        state.progression.apply_upgrade(UpgradeId::Shield, &mut player);
        state.progression.apply_upgrade(UpgradeId::Shield, &mut player);
        state.player.shield = 0;

        regen_shield(&mut state, 9.5);
        assert_eq!(state.player.shield, 0);
        regen_shield(&mut state, 0.5);
        assert_eq!(state.player.shield, 1);
        assert_eq!(state.player.shield_timer, 0.0);
        for _ in 0..3 {
            regen_shield(&mut state, 10.0);
        }
        assert_eq!(state.player.shield, 2);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = quiet_state();
        state.score = 50.0;
        state.player.hp = 0.0;
        state.game_over();
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.hp, state.player.hp_max);
        assert_eq!(state.best, 50);
        assert!(state.area.contains(state.player.pos, state.player.radius));
    }

    #[test]
    fn test_passive_score() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), 0.25);
        assert!((state.score - 1.0).abs() < 1e-4);
    }
}

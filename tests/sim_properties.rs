use glam::Vec2;
use proptest::prelude::*;

use rogue_survivor::Tuning;
use rogue_survivor::consts::{ENEMY_RADIUS, MAX_FRAME_DT, PLAYER_RADIUS};
use rogue_survivor::sim::progression::Progression;
use rogue_survivor::sim::{GameState, PlayArea, TickInput, tick};

proptest! {
    #[test]
    fn clamp_always_lands_inside(
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
        r in 1.0f32..60.0,
        w in 400.0f32..2560.0,
        h in 300.0f32..1440.0,
    ) {
        let area = PlayArea::from_viewport(w, h);
        let p = area.clamp(Vec2::new(x, y), r);
        prop_assert!(area.contains(p, r), "{:?} outside for r={}", p, r);
    }

    #[test]
    fn clamp_is_idempotent(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
        let area = PlayArea::from_viewport(1280.0, 720.0);
        let once = area.clamp(Vec2::new(x, y), PLAYER_RADIUS);
        let twice = area.clamp(once, PLAYER_RADIUS);
        prop_assert!(once.distance(twice) < 1e-2);
    }

    #[test]
    fn hostile_stats_monotonic(t1 in 0.0f32..3600.0, extra in 0.0f32..3600.0) {
        let tuning = Tuning::default();
        let t2 = t1 + extra;
        for curves in [tuning.enemy, tuning.boss] {
            prop_assert!(curves.hp.at(t2) >= curves.hp.at(t1));
            prop_assert!(curves.speed.at(t2) >= curves.speed.at(t1));
            prop_assert!(curves.damage.at(t2) >= curves.damage.at(t1));
        }
        prop_assert!(tuning.spawn_rate.at(t2) >= tuning.spawn_rate.at(t1));
    }

    #[test]
    fn leveling_counts_each_threshold(start in 0.0f32..29.0, gain in 0.0f32..2000.0) {
        let mut prog = Progression::new();
        prog.xp = start;
        let mut needs = vec![prog.xp_needed];
        let reached = prog.add_xp(gain);
        prop_assert_eq!(prog.level as usize, 1 + reached.len());
        for _ in &reached {
            let next = Progression::next_requirement(*needs.last().unwrap());
            prop_assert!(next > *needs.last().unwrap());
            needs.push(next);
        }
        prop_assert_eq!(prog.xp_needed, *needs.last().unwrap());
        prop_assert!(prog.xp >= 0.0 && prog.xp < prog.xp_needed as f32);
    }

    #[test]
    fn everything_stays_in_bounds(seed in any::<u64>(), steps in 1usize..400, dx in -1.0f32..1.0, dy in -1.0f32..1.0) {
        let mut state = GameState::new(seed);
        // Early game with a hurried clock so enemies and the boss show up.
        state.elapsed = 118.0;
        let input = TickInput { movement: Vec2::new(dx, dy), dash: true, choose: Some(0), ..Default::default() };
        for _ in 0..steps {
            tick(&mut state, &input, MAX_FRAME_DT);
            let area = state.area;
            prop_assert!(area.contains(state.player.pos, state.player.radius));
            for e in &state.enemies {
                prop_assert!(area.contains(e.pos, ENEMY_RADIUS));
            }
            if let Some(b) = &state.boss {
                prop_assert!(area.contains(b.pos, b.radius));
            }
            prop_assert!(state.player.hp >= 0.0 && state.player.hp <= state.player.hp_max);
            prop_assert!(state.player.shield <= 3);
        }
    }
}

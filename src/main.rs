//! Rogue Survivor headless runner
//!
//! Plays a session with the autopilot at a fixed 60 Hz frame rate and logs
//! gameplay events. Usage: `rogue-survivor [settings.json] [seconds]`.

use rogue_survivor::sim::{Autopilot, GameEvent, GamePhase};
use rogue_survivor::{JsonFileScoreStore, Session, Settings, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 300.0;

fn main() {
    env_logger::init();
    log::info!("Rogue Survivor (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let path = std::path::Path::new(&path);
            if !path.exists() {
                // First run: leave an editable copy of the defaults behind
                match Settings::default().save(path) {
                    Ok(()) => log::info!("Wrote default settings to {}", path.display()),
                    Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
                }
            }
            Settings::load(path)
        }
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let tuning = settings
        .tuning_path
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    let store = JsonFileScoreStore::new(&settings.best_score_path);
    log::info!("Best score kept in {}", store.path().display());
    let mut session = Session::new(&settings, tuning, store);
    let pilot = Autopilot::default();

    let frames = (seconds / FRAME_DT).ceil() as u64;
    let mut kills = 0u32;
    let mut boss_kills = 0u32;
    for _ in 0..frames {
        let input = pilot.steer(session.state());
        let frame = session.frame(&input, FRAME_DT);

        for event in &frame.events {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::BossKilled { .. } => boss_kills += 1,
                GameEvent::NewBestScore { score } => {
                    println!("New best score: {}", score);
                }
                other => log::debug!("{:?}", other),
            }
        }

        if frame.snapshot.phase == GamePhase::GameOver {
            break;
        }
    }

    let snap = rogue_survivor::sim::Snapshot::capture(session.state());
    println!(
        "Survived {} | level {} | score {} | best {} | kills {} | bosses {}",
        snap.clock(),
        snap.level,
        snap.score,
        snap.best,
        kills,
        boss_kills
    );
}

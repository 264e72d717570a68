//! Best-score persistence
//!
//! The simulation only tracks the number; storing it is up to a
//! `ScoreStore`. Read once at startup, written whenever a run beats it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key-value backing for the best score
pub trait ScoreStore {
    /// Stored best score, or 0 when nothing usable is stored
    fn load_best(&self) -> u64;
    /// Persist a new best score
    fn store_best(&mut self, score: u64) -> std::io::Result<()>;
}

/// In-memory store (tests, ephemeral runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: u64,
    /// Number of successful writes
    pub writes: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> u64 {
        self.best
    }

    fn store_best(&mut self, score: u64) -> std::io::Result<()> {
        self.best = score;
        self.writes += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load_best(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No best score at {} ({}), starting fresh", self.path.display(), e);
                return 0;
            }
        };
        match serde_json::from_str::<BestRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded best score {}", record.best);
                record.best
            }
            Err(e) => {
                log::warn!("Corrupt best score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn store_best(&mut self, score: u64) -> std::io::Result<()> {
        let json = serde_json::to_string(&BestRecord { best: score })?;
        // Write-then-rename so a crash never leaves a torn file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

//! Runner settings
//!
//! Viewport size, frame clamp, seed and where the best score is kept.
//! Persisted as JSON next to the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::consts::MAX_FRAME_DT;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical viewport width the play area is derived from
    pub viewport_width: f32,
    /// Logical viewport height the play area is derived from
    pub viewport_height: f32,
    /// Largest wall-clock delta fed into a single tick (seconds)
    pub max_frame_dt: f32,
    /// Run seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Best-score file
    pub best_score_path: PathBuf,
    /// Optional balance override file
    pub tuning_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
            best_score_path: PathBuf::from("rogue_survivor_best.json"),
            tuning_path: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from disk, or defaults if missing/invalid
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Seed to use for the next run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5eed)
        })
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            log::warn!(
                "Viewport {}x{} is not usable, using {}x{}",
                self.viewport_width,
                self.viewport_height,
                defaults.viewport_width,
                defaults.viewport_height
            );
            self.viewport_width = defaults.viewport_width;
            self.viewport_height = defaults.viewport_height;
        }
        if !(self.max_frame_dt > 0.0) {
            self.max_frame_dt = defaults.max_frame_dt;
        }
        self
    }
}

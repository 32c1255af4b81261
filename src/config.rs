//! Runtime tuning loaded from `invaders.toml`.
//!
//! Every field defaults to its compile-time value in [`crate::constants`], so
//! a file only needs the keys it wants to override. A missing file is not an
//! error; the game simply runs on defaults.

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::constants::*;
use crate::error::{GameError, GameResult};

pub const DEFAULT_CONFIG_FILE: &str = "invaders.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub win_score: u32,
    pub grace_period_ticks: u32,
    pub invader_fire_interval: u64,
    pub player_speed: f64,
    pub player_tilt: f64,
    pub star_count: usize,
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            win_score: WIN_SCORE,
            grace_period_ticks: GRACE_PERIOD_TICKS,
            invader_fire_interval: INVADER_FIRE_INTERVAL,
            player_speed: PLAYER_SPEED,
            player_tilt: PLAYER_TILT,
            star_count: STAR_COUNT,
            tick_ms: TICK_MS,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document. Unknown keys are ignored, missing keys default.
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<GameConfig> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self, path: &Path) -> GameResult<()> {
        let bad = |message: &str| GameError::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(bad("field dimensions must be positive"));
        }
        if self.invader_fire_interval == 0 {
            return Err(bad("invader_fire_interval must be at least 1"));
        }
        if self.tick_ms == 0 {
            return Err(bad("tick_ms must be at least 1"));
        }
        if self.player_speed < 0.0 {
            return Err(bad("player_speed must not be negative"));
        }
        Ok(())
    }

    /// Load `path`, falling back to defaults when it is absent or unusable.
    pub fn load_or_default(path: &Path) -> GameConfig {
        match std::fs::read_to_string(path) {
            Ok(contents) => match GameConfig::from_toml_str(&contents, path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("{}; using defaults", e);
                    GameConfig::default()
                }
            },
            Err(_) => {
                info!("No config at {}; using defaults", path.display());
                GameConfig::default()
            }
        }
    }
}

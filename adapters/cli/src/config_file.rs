//! Optional TOML file overriding the default game configuration.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use snake_core::{Cell, GameConfig};

/// Settings accepted in a configuration file; every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    board_size: Option<u32>,
    spawn: Option<[u32; 2]>,
    base_interval_ms: Option<u64>,
    min_interval_ms: Option<u64>,
    speed_ramp: Option<f64>,
    seed: Option<u64>,
}

impl ConfigFile {
    /// Parses configuration file contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse snake configuration toml contents")
    }

    /// Overlays the present fields onto `base`.
    pub(crate) fn apply(&self, base: GameConfig) -> GameConfig {
        let mut config = base;
        if let Some(board_size) = self.board_size {
            config = config.with_board_size(board_size);
        }
        if let Some([x, y]) = self.spawn {
            config = config.with_spawn(Cell::new(x, y));
        }
        if let Some(millis) = self.base_interval_ms {
            config = config.with_base_interval(Duration::from_millis(millis));
        }
        if let Some(millis) = self.min_interval_ms {
            config = config.with_min_interval(Duration::from_millis(millis));
        }
        if let Some(speed_ramp) = self.speed_ramp {
            config = config.with_speed_ramp(speed_ramp);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Reads `path` and overlays it onto the default configuration.
pub(crate) fn load(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    let file = ConfigFile::parse(&contents)
        .with_context(|| format!("invalid configuration file {}", path.display()))?;
    Ok(file.apply(GameConfig::default()))
}

use std::time::Duration;

use crate::{Cell, BOARD_SIZE, SPAWN_CELL};

const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(200);
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(20);
const DEFAULT_SPEED_RAMP: f64 = 0.9;
const DEFAULT_SEED: u64 = 0x5eed_5a4e;

/// Tunable parameters shared by the world and the session controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    board_size: u32,
    spawn: Cell,
    base_interval: Duration,
    min_interval: Duration,
    speed_ramp: f64,
    seed: u64,
}

impl GameConfig {
    /// Side length of the square board.
    #[must_use]
    pub const fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Cell occupied by the head when a session starts.
    #[must_use]
    pub const fn spawn(&self) -> Cell {
        self.spawn
    }

    /// Tick interval applied on every session start.
    #[must_use]
    pub const fn base_interval(&self) -> Duration {
        self.base_interval
    }

    /// Floor below which speed mode stops shrinking the tick interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Factor applied to the tick interval per meal in speed mode.
    #[must_use]
    pub fn speed_ramp(&self) -> f64 {
        self.speed_ramp
    }

    /// Seed for the world's random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a copy using the provided board size.
    #[must_use]
    pub const fn with_board_size(mut self, board_size: u32) -> Self {
        self.board_size = board_size;
        self
    }

    /// Returns a copy using the provided spawn cell.
    #[must_use]
    pub const fn with_spawn(mut self, spawn: Cell) -> Self {
        self.spawn = spawn;
        self
    }

    /// Returns a copy using the provided base tick interval.
    #[must_use]
    pub const fn with_base_interval(mut self, base_interval: Duration) -> Self {
        self.base_interval = base_interval;
        self
    }

    /// Returns a copy using the provided tick interval floor.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Returns a copy using the provided speed ramp factor.
    #[must_use]
    pub fn with_speed_ramp(mut self, speed_ramp: f64) -> Self {
        self.speed_ramp = speed_ramp;
        self
    }

    /// Returns a copy using the provided random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that the parameters describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if !self.spawn.is_within(self.board_size) {
            return Err(ConfigError::SpawnOutsideBoard {
                spawn: self.spawn,
                board_size: self.board_size,
            });
        }
        if self.base_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !(self.speed_ramp > 0.0 && self.speed_ramp <= 1.0) {
            return Err(ConfigError::InvalidSpeedRamp(self.speed_ramp));
        }
        if self.min_interval > self.base_interval {
            return Err(ConfigError::FloorAboveBase {
                min_interval: self.min_interval,
                base_interval: self.base_interval,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            spawn: SPAWN_CELL,
            base_interval: DEFAULT_BASE_INTERVAL,
            min_interval: DEFAULT_MIN_INTERVAL,
            speed_ramp: DEFAULT_SPEED_RAMP,
            seed: DEFAULT_SEED,
        }
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("board size must be positive")]
    EmptyBoard,
    /// The spawn cell does not lie on the board.
    #[error("spawn cell {spawn} lies outside a {board_size}x{board_size} board")]
    SpawnOutsideBoard {
        /// Configured spawn cell.
        spawn: Cell,
        /// Configured board size.
        board_size: u32,
    },
    /// The base tick interval is zero.
    #[error("base tick interval must be positive")]
    ZeroInterval,
    /// The speed ramp factor lies outside `(0, 1]`.
    #[error("speed ramp must lie in (0, 1] (received {0})")]
    InvalidSpeedRamp(f64),
    /// The tick interval floor exceeds the base interval.
    #[error("minimum interval {min_interval:?} exceeds base interval {base_interval:?}")]
    FloorAboveBase {
        /// Configured floor.
        min_interval: Duration,
        /// Configured base interval.
        base_interval: Duration,
    },
}

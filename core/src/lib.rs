#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the session controller. The controller submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what happened. Every tick additionally yields a [`TickOutcome`]
//! carrying an immutable [`Snapshot`] that view layers render from.

mod config;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig};

/// Side length of the square board used by every game mode.
pub const BOARD_SIZE: u32 = 20;

/// Cell occupied by the snake's head when a session starts.
pub const SPAWN_CELL: Cell = Cell::new(9, 9);

/// Rule variant selected when a session starts.
///
/// The mode is immutable for the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Bounded board; leaving it, hitting the body or a wall ends the session.
    #[default]
    Classic,
    /// Toroidal board; the snake wraps around edges and never collides.
    NoDie,
    /// Classic rules plus one new wall every time food is eaten.
    Walls,
    /// Two linked food cells; eating one teleports the head to the other.
    Portal,
    /// Classic rules with a tick interval that shrinks on every meal.
    Speed,
}

impl GameMode {
    /// Every mode in menu order.
    pub const ALL: [GameMode; 5] = [
        GameMode::Classic,
        GameMode::NoDie,
        GameMode::Walls,
        GameMode::Portal,
        GameMode::Speed,
    ];

    /// Number of food cells kept on the board.
    #[must_use]
    pub const fn food_count(self) -> usize {
        match self {
            Self::Portal => 2,
            _ => 1,
        }
    }

    /// Reports whether the head wraps around board edges.
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::NoDie)
    }

    /// Identifier used by menus and configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::NoDie => "noDie",
            Self::Walls => "walls",
            Self::Portal => "portal",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = UnknownGameMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .or_else(|| {
                // Accept the kebab spelling used on command lines.
                trimmed
                    .eq_ignore_ascii_case("no-die")
                    .then_some(Self::NoDie)
            })
            .ok_or_else(|| UnknownGameMode(trimmed.to_owned()))
    }
}

/// Error returned when a string names no known [`GameMode`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown game mode `{0}` (expected classic, noDie, walls, portal or speed)")]
pub struct UnknownGameMode(String);

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    Up,
    /// Movement toward increasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    #[default]
    Right,
}

impl Direction {
    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` is the exact reverse of `self`.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: u32,
    y: u32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Reports whether the cell lies on a square board of `board_size` cells.
    #[must_use]
    pub const fn is_within(&self, board_size: u32) -> bool {
        self.x < board_size && self.y < board_size
    }

    /// Neighbouring cell in `direction`, or `None` when it falls off the board.
    #[must_use]
    pub fn step(self, direction: Direction, board_size: u32) -> Option<Cell> {
        let (dx, dy) = direction.offset();
        let x = i64::from(self.x) + dx;
        let y = i64::from(self.y) + dy;
        let bound = i64::from(board_size);
        if (0..bound).contains(&x) && (0..bound).contains(&y) {
            Some(Cell::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
        } else {
            None
        }
    }

    /// Neighbouring cell in `direction` on a toroidal board.
    ///
    /// A zero `board_size` leaves the cell unchanged.
    #[must_use]
    pub fn wrapping_step(self, direction: Direction, board_size: u32) -> Cell {
        if board_size == 0 {
            return self;
        }
        let (dx, dy) = direction.offset();
        let bound = i64::from(board_size);
        let x = (i64::from(self.x) + dx).rem_euclid(bound);
        let y = (i64::from(self.y) + dy).rem_euclid(bound);
        // rem_euclid keeps both values in 0..board_size.
        Cell::new(x as u32, y as u32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current session and starts a fresh one.
    NewSession {
        /// Rule variant for the new session.
        mode: GameMode,
    },
    /// Buffers the direction applied on the next advance.
    RequestDirection {
        /// Requested heading.
        direction: Direction,
    },
    /// Advances the simulation by exactly one tick.
    Advance,
}

/// Reasons a tick can end the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// The head left the board.
    OutOfBounds,
    /// The head entered a cell occupied by the snake.
    SelfCollision,
    /// The head entered a wall cell.
    Wall,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a fresh session replaced the previous one.
    SessionStarted {
        /// Rule variant of the new session.
        mode: GameMode,
        /// Cell occupied by the head.
        head: Cell,
    },
    /// Confirms that a direction was buffered for the next tick.
    DirectionQueued {
        /// Buffered heading.
        direction: Direction,
    },
    /// Reports that a reversal request was dropped.
    DirectionRejected {
        /// Heading that was refused.
        direction: Direction,
    },
    /// Confirms that the head moved between two cells.
    SnakeAdvanced {
        /// Head cell before the move.
        from: Cell,
        /// Head cell after the move.
        to: Cell,
    },
    /// Confirms that the head consumed a food cell.
    FoodEaten {
        /// Cell the food occupied.
        cell: Cell,
        /// Index of the consumed cell within the food list.
        index: usize,
    },
    /// Confirms that the head jumped through a portal pair.
    Teleported {
        /// Portal cell the head entered.
        from: Cell,
        /// Portal cell the head now occupies.
        to: Cell,
    },
    /// Confirms that the food list was replaced.
    FoodSpawned {
        /// Cells of the new food list in index order.
        cells: Vec<Cell>,
    },
    /// Confirms that a wall was added to the board.
    WallSpawned {
        /// Cell the wall occupies.
        cell: Cell,
    },
    /// Reports that the tick ended the session.
    Collided {
        /// Cell the head attempted to enter, when it lies on the board.
        cell: Option<Cell>,
        /// What the head ran into.
        kind: CollisionKind,
    },
}

/// Whether a tick kept the session alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickStatus {
    /// The session continues.
    Continued,
    /// The session ended; no state changed this tick.
    Collided,
}

/// Side effects observed during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeTags {
    /// The head consumed a food cell.
    pub ate_food: bool,
    /// The head jumped through a portal pair.
    pub teleported: bool,
    /// A new wall was placed.
    pub spawned_wall: bool,
}

/// Result of advancing the world by one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Whether the session survived the tick.
    pub status: TickStatus,
    /// Side effects observed during the tick.
    pub tags: OutcomeTags,
    /// Entity positions after the tick.
    pub snapshot: Snapshot,
}

impl TickOutcome {
    /// Reports whether the tick ended the session.
    #[must_use]
    pub fn is_collided(&self) -> bool {
        self.status == TickStatus::Collided
    }
}

/// Immutable copy of every entity the view layer draws.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// Side length of the square board.
    pub board_size: u32,
    /// Rule variant of the session.
    pub mode: GameMode,
    /// Heading applied on the last tick.
    pub direction: Direction,
    /// Snake cells, head first.
    pub snake: Vec<Cell>,
    /// Food cells in index order; two linked portals in portal mode.
    pub food: Vec<Cell>,
    /// Wall cells in spawn order.
    pub walls: Vec<Cell>,
}

impl Snapshot {
    /// Head cell of the snake, if any.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

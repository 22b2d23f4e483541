#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state simulation for the snake engine.
//!
//! The [`World`] owns the snake, food, walls, heading and game mode of the
//! current session. It is advanced one tick at a time and never draws,
//! sleeps, or reads input: callers feed it [`Command`] values through
//! [`apply`] (or the equivalent direct methods) and render from the returned
//! [`TickOutcome`] snapshots.

mod placement;

use std::collections::VecDeque;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{
    Cell, CollisionKind, Command, ConfigError, Direction, Event, GameConfig, GameMode,
    OutcomeTags, Snapshot, TickOutcome, TickStatus,
};

use self::placement::{random_free_cell, random_free_cells, Occupancy};

/// Represents the authoritative snake world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    mode: GameMode,
    snake: VecDeque<Cell>,
    food: Vec<Cell>,
    walls: Vec<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    collided: bool,
    tick_index: u64,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world running a classic session on the configured board.
    ///
    /// Returns an error when `config` fails [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self {
            config,
            mode: GameMode::Classic,
            snake: VecDeque::new(),
            food: Vec::new(),
            walls: Vec::new(),
            direction: Direction::Right,
            pending_direction: None,
            collided: false,
            tick_index: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
        };
        world.reset(GameMode::Classic);
        Ok(world)
    }

    /// Discards the current session and starts a fresh one in `mode`.
    ///
    /// The snake restarts as a single head on the spawn cell heading right,
    /// walls are cleared and food is placed on free cells.
    pub fn new_session(&mut self, mode: GameMode, out_events: &mut Vec<Event>) -> Snapshot {
        self.reset(mode);
        info!("started {mode} session");
        out_events.push(Event::SessionStarted {
            mode,
            head: self.head(),
        });
        out_events.push(Event::FoodSpawned {
            cells: self.food.clone(),
        });
        self.snapshot()
    }

    /// Buffers `direction` for the next tick unless it reverses the current heading.
    ///
    /// The last accepted request before a tick wins. Returns `false` when the
    /// request was dropped.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            debug!("dropped reversal from {:?} to {direction:?}", self.direction);
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advances the simulation by one tick.
    ///
    /// A collision leaves snake, food, walls and heading untouched; every
    /// further call keeps reporting [`TickStatus::Collided`] until a new
    /// session starts.
    pub fn advance(&mut self, out_events: &mut Vec<Event>) -> TickOutcome {
        if self.collided {
            return self.outcome(TickStatus::Collided, OutcomeTags::default());
        }

        let direction = self.pending_direction.unwrap_or(self.direction);
        let from = self.head();
        let board_size = self.config.board_size();

        let to = if self.mode.wraps() {
            from.wrapping_step(direction, board_size)
        } else {
            match self.check_collision(from.step(direction, board_size)) {
                Ok(cell) => cell,
                Err((cell, kind)) => {
                    self.collided = true;
                    info!("{} session ended: {kind:?} at tick {}", self.mode, self.tick_index);
                    out_events.push(Event::Collided { cell, kind });
                    return self.outcome(TickStatus::Collided, OutcomeTags::default());
                }
            }
        };

        self.direction = direction;
        self.pending_direction = None;
        self.tick_index = self.tick_index.saturating_add(1);
        self.snake.push_front(to);
        debug!("tick {}: head {from} -> {to}", self.tick_index);
        out_events.push(Event::SnakeAdvanced { from, to });

        let mut tags = OutcomeTags::default();
        match self.food.iter().position(|food| *food == to) {
            Some(index) => {
                tags.ate_food = true;
                out_events.push(Event::FoodEaten { cell: to, index });
                self.consume_food(index, &mut tags, out_events);
            }
            None => {
                let _ = self.snake.pop_back();
            }
        }

        self.outcome(TickStatus::Continued, tags)
    }

    /// Copies every entity the view layer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board_size: self.config.board_size(),
            mode: self.mode,
            direction: self.direction,
            snake: self.snake.iter().copied().collect(),
            food: self.food.clone(),
            walls: self.walls.clone(),
        }
    }

    fn reset(&mut self, mode: GameMode) {
        self.mode = mode;
        self.snake.clear();
        self.snake.push_back(self.config.spawn());
        self.walls.clear();
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.collided = false;
        self.tick_index = 0;
        self.food = self.spawn_food();
    }

    fn head(&self) -> Cell {
        // The snake is never empty: reset seeds it and ticks only replace the head.
        self.snake.front().copied().unwrap_or(self.config.spawn())
    }

    fn check_collision(
        &self,
        target: Option<Cell>,
    ) -> Result<Cell, (Option<Cell>, CollisionKind)> {
        let Some(cell) = target else {
            return Err((None, CollisionKind::OutOfBounds));
        };
        if self.snake.contains(&cell) {
            return Err((Some(cell), CollisionKind::SelfCollision));
        }
        if self.walls.contains(&cell) {
            return Err((Some(cell), CollisionKind::Wall));
        }
        Ok(cell)
    }

    fn consume_food(&mut self, index: usize, tags: &mut OutcomeTags, out_events: &mut Vec<Event>) {
        if self.mode == GameMode::Portal && self.food.len() == 2 {
            let entered = self.food[index];
            let exit = self.food[(index + 1) % 2];
            if let Some(head) = self.snake.front_mut() {
                *head = exit;
            }
            tags.teleported = true;
            out_events.push(Event::Teleported {
                from: entered,
                to: exit,
            });
            self.food = self.spawn_food();
        } else {
            let occupancy = self.occupancy();
            self.food[index] = random_free_cell(&mut self.rng, self.config.board_size(), &occupancy);
        }
        out_events.push(Event::FoodSpawned {
            cells: self.food.clone(),
        });

        if self.mode == GameMode::Walls {
            let occupancy = self.occupancy();
            let wall = random_free_cell(&mut self.rng, self.config.board_size(), &occupancy);
            self.walls.push(wall);
            tags.spawned_wall = true;
            out_events.push(Event::WallSpawned { cell: wall });
        }
    }

    fn spawn_food(&mut self) -> Vec<Cell> {
        let occupancy = Occupancy::from_cells(self.snake.iter().chain(self.walls.iter()));
        random_free_cells(
            &mut self.rng,
            self.config.board_size(),
            occupancy,
            self.mode.food_count(),
        )
    }

    fn occupancy(&self) -> Occupancy {
        Occupancy::from_cells(
            self.snake
                .iter()
                .chain(self.walls.iter())
                .chain(self.food.iter()),
        )
    }

    fn outcome(&self, status: TickStatus, tags: OutcomeTags) -> TickOutcome {
        TickOutcome {
            status,
            tags,
            snapshot: self.snapshot(),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Returns the tick outcome when the command advanced the simulation.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) -> Option<TickOutcome> {
    match command {
        Command::NewSession { mode } => {
            let _ = world.new_session(mode, out_events);
            None
        }
        Command::RequestDirection { direction } => {
            if world.request_direction(direction) {
                out_events.push(Event::DirectionQueued { direction });
            } else {
                out_events.push(Event::DirectionRejected { direction });
            }
            None
        }
        Command::Advance => Some(world.advance(out_events)),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use snake_core::{Cell, Direction, GameConfig, GameMode};

    /// Rule variant of the running session.
    #[must_use]
    pub fn mode(world: &World) -> GameMode {
        world.mode
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Heading applied on the last tick.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.direction
    }

    /// Heading buffered for the next tick, if any.
    #[must_use]
    pub fn pending_direction(world: &World) -> Option<Direction> {
        world.pending_direction
    }

    /// Head cell of the snake.
    #[must_use]
    pub fn head(world: &World) -> Cell {
        world.head()
    }

    /// Number of cells the snake occupies.
    #[must_use]
    pub fn snake_len(world: &World) -> usize {
        world.snake.len()
    }

    /// Snake cells, head first.
    pub fn snake(world: &World) -> impl Iterator<Item = Cell> + '_ {
        world.snake.iter().copied()
    }

    /// Food cells in index order.
    #[must_use]
    pub fn food(world: &World) -> &[Cell] {
        &world.food
    }

    /// Wall cells in spawn order.
    #[must_use]
    pub fn walls(world: &World) -> &[Cell] {
        &world.walls
    }

    /// Reports whether the running session has ended.
    #[must_use]
    pub fn has_collided(world: &World) -> bool {
        world.collided
    }

    /// Number of ticks the running session survived.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

/// Direct state overrides used to stage deterministic scenarios in tests.
#[cfg(any(test, feature = "scenario_scaffolding"))]
pub mod scaffolding {
    use super::World;
    use snake_core::{Cell, Direction};

    /// Replaces the snake body (head first) and the current heading.
    pub fn place_snake(world: &mut World, cells: &[Cell], direction: Direction) {
        world.snake = cells.iter().copied().collect();
        world.direction = direction;
        world.pending_direction = None;
    }

    /// Replaces the food list.
    pub fn place_food(world: &mut World, cells: &[Cell]) {
        world.food = cells.to_vec();
    }

    /// Replaces the wall list.
    pub fn place_walls(world: &mut World, cells: &[Cell]) {
        world.walls = cells.to_vec();
    }
}

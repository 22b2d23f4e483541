#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that drives the snake world from host callbacks.
//!
//! A [`Session`] owns the world, the tick clock and the [`SessionState`]
//! (score, best score, tick interval and phase). Hosts forward raw key
//! presses to [`Session::on_input`], lifecycle requests to
//! [`Session::handle_lifecycle`] and frame deltas to [`Session::on_tick`];
//! every fired tick yields a [`TickOutcome`] whose snapshot is ready to draw.

mod clock;
mod keys;
#[cfg(test)]
mod scenarios;

use std::time::Duration;

use log::{debug, info};
use snake_core::{ConfigError, Direction, Event, GameConfig, GameMode, Snapshot, TickOutcome};
use snake_world::World;

pub use self::clock::TickClock;
pub use self::keys::direction_for_key;

/// Which screen the host is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Mode selection; the simulation is paused.
    #[default]
    Menu,
    /// A session is running and ticks advance the world.
    Playing,
}

/// Highest score reached during the process lifetime.
///
/// The value only ever grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BestScore(u32);

impl BestScore {
    /// Creates a best score seeded with a previously reached value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Raises the best score to `score` when it is higher.
    ///
    /// Returns `true` when the record was beaten.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }
}

/// Lifecycle requests issued by the host's menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Start a fresh session in the provided mode.
    StartGame(GameMode),
    /// Leave the running session and show the menu.
    ReturnToMenu,
}

/// Mutable state owned exclusively by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Food eaten during the current or last session.
    pub score: u32,
    /// Highest score reached since the controller was created.
    pub best_score: BestScore,
    /// Minimum time between two ticks.
    pub speed: Duration,
    /// Screen currently shown by the host.
    pub phase: Phase,
    /// Rule variant of the current or last session.
    pub mode: GameMode,
}

/// Controller translating host callbacks into world commands.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    world: World,
    clock: TickClock,
    state: SessionState,
    events: Vec<Event>,
}

impl Session {
    /// Creates a controller sitting in the menu.
    ///
    /// `best_score` carries the record over from earlier controllers. Returns
    /// an error when `config` fails [`GameConfig::validate`].
    pub fn new(config: GameConfig, best_score: BestScore) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            world: World::new(config)?,
            clock: TickClock::default(),
            state: SessionState {
                score: 0,
                best_score,
                speed: config.base_interval(),
                phase: Phase::Menu,
                mode: GameMode::Classic,
            },
            events: Vec::new(),
        })
    }

    /// Starts a fresh session in `mode` and switches to [`Phase::Playing`].
    ///
    /// Score and tick interval return to their initial values; the best score
    /// is kept.
    pub fn start_game(&mut self, mode: GameMode) -> Snapshot {
        self.events.clear();
        let snapshot = self.world.new_session(mode, &mut self.events);
        self.clock.reset();
        self.state.score = 0;
        self.state.speed = self.config.base_interval();
        self.state.phase = Phase::Playing;
        self.state.mode = mode;
        snapshot
    }

    /// Switches to [`Phase::Menu`] without touching the session state.
    pub fn return_to_menu(&mut self) {
        if self.state.phase == Phase::Playing {
            info!("left {} session with score {}", self.state.mode, self.state.score);
        }
        self.state.phase = Phase::Menu;
    }

    /// Dispatches a lifecycle request from the host.
    ///
    /// Returns the fresh snapshot when a session started.
    pub fn handle_lifecycle(&mut self, request: Lifecycle) -> Option<Snapshot> {
        match request {
            Lifecycle::StartGame(mode) => Some(self.start_game(mode)),
            Lifecycle::ReturnToMenu => {
                self.return_to_menu();
                None
            }
        }
    }

    /// Forwards a raw key press to the world.
    ///
    /// Keys outside the directional set and presses while the menu is shown
    /// are ignored. Returns `true` when a heading was buffered.
    pub fn on_input(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(direction) => self.on_direction(direction),
            None => false,
        }
    }

    /// Forwards an already decoded heading to the world.
    pub fn on_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        self.world.request_direction(direction)
    }

    /// Feeds frame time to the tick clock and advances the world when due.
    ///
    /// At most one tick fires per call. Returns the tick outcome when the
    /// world advanced.
    pub fn on_tick(&mut self, elapsed: Duration) -> Option<TickOutcome> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        if !self.clock.accumulate(elapsed, self.state.speed) {
            return None;
        }

        self.events.clear();
        let outcome = self.world.advance(&mut self.events);
        if outcome.tags.ate_food {
            self.on_food_eaten();
        }
        if outcome.is_collided() {
            info!(
                "{} session over with score {} (best {})",
                self.state.mode,
                self.state.score,
                self.state.best_score.get()
            );
            // Score stays visible until the next start_game resets it.
            self.state.phase = Phase::Menu;
        }
        Some(outcome)
    }

    /// Read-only view of the controller state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Events produced by the most recent start or tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the simulated world for staging scenarios.
    #[cfg(any(test, feature = "scenario_scaffolding"))]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Copies every entity the view layer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    fn on_food_eaten(&mut self) {
        self.state.score = self.state.score.saturating_add(1);
        if self.state.best_score.record(self.state.score) {
            debug!("new best score {}", self.state.score);
        }
        if self.state.mode == GameMode::Speed {
            let ramped = self.state.speed.mul_f64(self.config.speed_ramp());
            self.state.speed = ramped.max(self.config.min_interval());
            debug!("tick interval ramped to {:?}", self.state.speed);
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays snake sessions in the terminal.

mod autopilot;
mod config_file;
mod text_backend;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use snake_core::{ConfigError, GameConfig, GameMode, Snapshot};
use snake_rendering::{
    BoardPresentation, FrameControl, Hud, Palette, Presentation, RenderingBackend, Scene,
    CELL_PIXELS,
};
use snake_system_session::{BestScore, Phase, Session, SessionState};

use crate::text_backend::TextBackend;

#[derive(Debug, Parser)]
#[command(name = "snake", version, about = "Play unattended snake sessions in the terminal")]
struct Cli {
    /// Rule variant: classic, noDie, walls, portal or speed.
    #[arg(long, default_value_t = GameMode::Classic)]
    mode: GameMode,

    /// Number of sessions to play back to back.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Seed for food and wall placement; overrides the configuration file.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding board size, spawn cell, tick intervals or seed.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upper bound on simulated frames across all sessions.
    #[arg(long, default_value_t = 50_000)]
    frames: u64,

    /// Simulated duration of one frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Sleep for the frame duration between frames.
    #[arg(long)]
    realtime: bool,

    /// Print only the per-session summary.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the snake command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let board = BoardPresentation::new(config.board_size(), CELL_PIXELS)?;
    let mut autoplay = Autoplay::new(config, cli.mode, cli.games, board)?;
    let presentation = Presentation::new("Snake", autoplay.palette, autoplay.menu_scene());

    TextBackend::new(Duration::from_millis(cli.frame_ms), cli.frames)
        .realtime(cli.realtime)
        .quiet(cli.quiet)
        .run(presentation, |elapsed, scene| autoplay.frame(elapsed, scene))?;

    autoplay.finish();
    for (index, score) in autoplay.scores.iter().enumerate() {
        println!("game {}: score {score}", index + 1);
    }
    println!(
        "best score: {}",
        autoplay.session.state().best_score.get()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => config_file::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

/// Drives a session from backend frames, steering with the autopilot.
#[derive(Debug)]
struct Autoplay {
    session: Session,
    mode: GameMode,
    games_left: u32,
    scores: Vec<u32>,
    board: BoardPresentation,
    palette: Palette,
}

impl Autoplay {
    fn new(
        config: GameConfig,
        mode: GameMode,
        games: u32,
        board: BoardPresentation,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            session: Session::new(config, BestScore::default())?,
            mode,
            games_left: games,
            scores: Vec::new(),
            board,
            palette: Palette::default(),
        })
    }

    fn frame(&mut self, elapsed: Duration, scene: &mut Scene) -> FrameControl {
        match self.session.state().phase {
            Phase::Menu => {
                if self.games_left == 0 {
                    return FrameControl::Exit;
                }
                self.games_left -= 1;
                info!("starting {} session", self.mode);
                let snapshot = self.session.start_game(self.mode);
                *scene = self.scene(&snapshot);
            }
            Phase::Playing => {
                if let Some(direction) = autopilot::choose_direction(&self.session.snapshot()) {
                    let _ = self.session.on_input(autopilot::key_for(direction));
                }
                if let Some(outcome) = self.session.on_tick(elapsed) {
                    if outcome.is_collided() {
                        self.scores.push(self.session.state().score);
                    }
                    *scene = self.scene(&outcome.snapshot);
                }
            }
        }
        FrameControl::Continue
    }

    /// Records the score of a session cut short by the frame limit.
    fn finish(&mut self) {
        if self.session.state().phase == Phase::Playing {
            info!("frame limit ended the running session");
            self.scores.push(self.session.state().score);
            self.session.return_to_menu();
        }
    }

    fn menu_scene(&self) -> Scene {
        self.scene(&self.session.snapshot())
    }

    fn scene(&self, snapshot: &Snapshot) -> Scene {
        Scene::from_snapshot(snapshot, hud(self.session.state()), self.board, &self.palette)
    }
}

fn hud(state: &SessionState) -> Hud {
    Hud {
        score: state.score,
        best_score: state.best_score.get(),
        mode: state.mode,
        playing: state.phase == Phase::Playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn autoplay(mode: GameMode, games: u32) -> Autoplay {
        let config = GameConfig::default().with_seed(11);
        let board = BoardPresentation::new(config.board_size(), CELL_PIXELS).expect("board");
        Autoplay::new(config, mode, games, board).expect("valid configuration")
    }

    #[test]
    fn menu_frame_starts_next_game() {
        let mut autoplay = autoplay(GameMode::Portal, 1);
        let mut scene = autoplay.menu_scene();

        assert_eq!(
            autoplay.frame(Duration::from_millis(16), &mut scene),
            FrameControl::Continue
        );
        assert_eq!(autoplay.session.state().phase, Phase::Playing);
        assert!(scene.hud.playing);
        assert_eq!(scene.hud.mode, GameMode::Portal);
    }

    #[test]
    fn exits_once_games_are_played() {
        let mut autoplay = autoplay(GameMode::Classic, 0);
        let mut scene = autoplay.menu_scene();

        assert_eq!(
            autoplay.frame(Duration::from_millis(16), &mut scene),
            FrameControl::Exit
        );
    }

    #[test]
    fn finish_records_running_session() {
        let mut autoplay = autoplay(GameMode::NoDie, 1);
        let mut scene = autoplay.menu_scene();
        for _ in 0..100 {
            let _ = autoplay.frame(Duration::from_millis(50), &mut scene);
        }

        autoplay.finish();

        assert_eq!(autoplay.scores.len(), 1);
        assert_eq!(autoplay.session.state().phase, Phase::Menu);
    }

    #[test]
    fn seed_flag_overrides_default() {
        let cli = Cli::parse_from(["snake", "--seed", "99", "--mode", "walls"]);
        let config = resolve_config(&cli).expect("valid configuration");

        assert_eq!(config.seed(), 99);
        assert_eq!(cli.mode, GameMode::Walls);
    }
}

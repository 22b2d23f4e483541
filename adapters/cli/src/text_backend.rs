//! Terminal backend that prints the board as text frames.

use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use snake_rendering::{CellKind, FrameControl, Presentation, RenderingBackend, Scene};

/// Backend writing a text frame whenever the scene changes.
#[derive(Debug)]
pub(crate) struct TextBackend {
    frame_time: Duration,
    max_frames: u64,
    realtime: bool,
    quiet: bool,
}

impl TextBackend {
    /// Creates a backend simulating frames of `frame_time` each.
    pub(crate) const fn new(frame_time: Duration, max_frames: u64) -> Self {
        Self {
            frame_time,
            max_frames,
            realtime: false,
            quiet: false,
        }
    }

    /// Sleeps for the frame time between frames.
    pub(crate) const fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Suppresses board output; only the closure's own reporting remains.
    pub(crate) const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl RenderingBackend for TextBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut scene = presentation.scene;
        if !self.quiet {
            writeln!(out, "== {} ==", presentation.window_title)
                .context("failed to write banner")?;
            write_frame(&mut out, &scene)?;
        }

        let mut exited = false;
        for _ in 0..self.max_frames {
            let previous = scene.clone();
            let control = update_scene(self.frame_time, &mut scene);
            if !self.quiet && scene != previous {
                write_frame(&mut out, &scene)?;
            }
            if control == FrameControl::Exit {
                exited = true;
                break;
            }
            if self.realtime {
                thread::sleep(self.frame_time);
            }
        }
        if !exited {
            log::warn!("frame limit of {} reached", self.max_frames);
        }
        out.flush().context("failed to flush terminal output")
    }
}

fn write_frame<W: Write>(out: &mut W, scene: &Scene) -> Result<()> {
    out.write_all(render_text(scene).as_bytes())
        .context("failed to write frame")
}

/// Renders `scene` as text lines framed by a border and topped by the HUD.
pub(crate) fn render_text(scene: &Scene) -> String {
    let side = scene.board.cells as usize;
    let mut grid = vec![vec!['.'; side]; side];
    // Later cells overdraw earlier ones, matching the draw order.
    for scene_cell in &scene.cells {
        let (x, y) = (scene_cell.cell.x() as usize, scene_cell.cell.y() as usize);
        if let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = glyph(scene_cell.kind);
        }
    }

    let hud = &scene.hud;
    let status = if hud.playing { "playing" } else { "menu" };
    let mut text = format!(
        "mode: {}  score: {}  best: {}  [{status}]\n",
        hud.mode, hud.score, hud.best_score
    );
    let border = format!("+{}+\n", "-".repeat(side));
    text.push_str(&border);
    for row in grid {
        text.push('|');
        text.extend(row);
        text.push_str("|\n");
    }
    text.push_str(&border);
    text
}

const fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::SnakeHead => '@',
        CellKind::SnakeBody => 'o',
        CellKind::Food => '*',
        CellKind::Wall => '#',
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for snake adapters.
//!
//! Adapters never touch simulation state. They receive a [`Scene`] built
//! from a world [`Snapshot`] plus a [`Hud`] and decide how to draw it. Cell
//! size is a view concern and lives here, not in the core.

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_core::{Cell, GameMode, Snapshot};
use std::{error::Error, fmt, time::Duration};

/// Pixel length of a single board cell (a 20 cell board fills 700 pixels).
pub const CELL_PIXELS: f32 = 35.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Fill colors used for each kind of entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Background cleared before each frame.
    pub background: Color,
    /// Snake segments.
    pub snake: Color,
    /// Food cells and portals.
    pub food: Color,
    /// Wall cells.
    pub wall: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x000000),
            snake: Color::from_hex(0x00ff00),
            food: Color::from_hex(0xff0000),
            wall: Color::from_hex(0xffff00),
        }
    }
}

/// What occupies a drawn cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Leading snake segment.
    SnakeHead,
    /// Any other snake segment.
    SnakeBody,
    /// Food, or one end of a portal pair.
    Food,
    /// Wall obstacle.
    Wall,
}

/// Single filled board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Board cell being drawn.
    pub cell: Cell,
    /// Entity occupying the cell.
    pub kind: CellKind,
    /// Fill color.
    pub color: Color,
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    /// Upper-left corner in pixels.
    pub origin: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
}

/// Describes the square board and its pixel scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of cells along each edge.
    pub cells: u32,
    /// Pixel length of a single cell.
    pub cell_length: f32,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when the cell length is not positive.
    pub fn new(cells: u32, cell_length: f32) -> std::result::Result<Self, RenderingError> {
        if !(cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }
        Ok(Self { cells, cell_length })
    }

    /// Total pixel length of the board edge.
    #[must_use]
    pub fn side(&self) -> f32 {
        self.cells as f32 * self.cell_length
    }

    /// Pixel rectangle covered by `cell`.
    #[must_use]
    pub fn cell_rect(&self, cell: Cell) -> PixelRect {
        PixelRect {
            origin: Vec2::new(
                cell.x() as f32 * self.cell_length,
                cell.y() as f32 * self.cell_length,
            ),
            size: Vec2::splat(self.cell_length),
        }
    }
}

/// Score panel shown next to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Food eaten in the current or last session.
    pub score: u32,
    /// Highest score reached since start-up.
    pub best_score: u32,
    /// Rule variant of the current or last session.
    pub mode: GameMode,
    /// Whether a session is running; `false` while the menu is shown.
    pub playing: bool,
}

/// Scene description combining the board, its entities and the score panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board dimensions and pixel scale.
    pub board: BoardPresentation,
    /// Filled cells in draw order: walls, food, then snake tail to head.
    pub cells: Vec<SceneCell>,
    /// Score panel contents.
    pub hud: Hud,
}

impl Scene {
    /// Builds a scene from a world snapshot.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &Snapshot,
        hud: Hud,
        board: BoardPresentation,
        palette: &Palette,
    ) -> Self {
        let mut cells =
            Vec::with_capacity(snapshot.walls.len() + snapshot.food.len() + snapshot.snake.len());
        cells.extend(snapshot.walls.iter().map(|cell| SceneCell {
            cell: *cell,
            kind: CellKind::Wall,
            color: palette.wall,
        }));
        cells.extend(snapshot.food.iter().map(|cell| SceneCell {
            cell: *cell,
            kind: CellKind::Food,
            color: palette.food,
        }));
        // Head drawn last so it stays visible when it overlaps the body.
        cells.extend(snapshot.snake.iter().enumerate().rev().map(|(index, cell)| {
            let kind = if index == 0 {
                CellKind::SnakeHead
            } else {
                CellKind::SnakeBody
            };
            SceneCell {
                cell: *cell,
                kind,
                color: palette.snake,
            }
        }));

        Self { board, cells, hud }
    }

    /// Entity drawn on top at `cell`, if any.
    #[must_use]
    pub fn top_kind_at(&self, cell: Cell) -> Option<CellKind> {
        self.cells
            .iter()
            .rev()
            .find(|scene_cell| scene_cell.cell == cell)
            .map(|scene_cell| scene_cell.kind)
    }
}

/// Top-level description consumed by a backend on start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window or banner.
    pub window_title: String,
    /// Colors used when drawing.
    pub palette: Palette,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            palette,
            scene,
        }
    }
}

/// Whether the backend should keep running after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Present the frame and schedule the next one.
    Continue,
    /// Present the frame and stop.
    Exit,
}

/// Rendering backend capable of presenting snake scenes.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update_scene` closure receives the frame delta and may replace the
    /// scene before it is presented; its return value decides whether another
    /// frame follows.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must cover a positive pixel length.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}

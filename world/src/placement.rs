//! Random placement of food and walls on unoccupied cells.

use std::collections::HashSet;

use log::warn;
use rand::{seq::IteratorRandom, Rng};
use snake_core::Cell;

/// Set of cells that freshly spawned entities must avoid.
#[derive(Debug, Default)]
pub(crate) struct Occupancy {
    cells: HashSet<Cell>,
}

impl Occupancy {
    /// Collects every cell yielded by the provided iterators.
    pub(crate) fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        Self {
            cells: cells.into_iter().copied().collect(),
        }
    }

    /// Marks an additional cell as taken.
    pub(crate) fn insert(&mut self, cell: Cell) {
        let _ = self.cells.insert(cell);
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// Draws a uniformly distributed free cell from a square board.
///
/// When every cell is taken the draw falls back to a uniform cell over the
/// whole board, so the caller always receives a position.
pub(crate) fn random_free_cell<R: Rng>(rng: &mut R, board_size: u32, occupancy: &Occupancy) -> Cell {
    let free = (0..board_size)
        .flat_map(|y| (0..board_size).map(move |x| Cell::new(x, y)))
        .filter(|cell| !occupancy.contains(*cell))
        .choose(rng);

    match free {
        Some(cell) => cell,
        None => {
            warn!("no free cell left on a {board_size}x{board_size} board, placing over an occupied cell");
            let bound = board_size.max(1);
            Cell::new(rng.gen_range(0..bound), rng.gen_range(0..bound))
        }
    }
}

/// Draws `count` distinct free cells, each avoiding the ones drawn before it.
pub(crate) fn random_free_cells<R: Rng>(
    rng: &mut R,
    board_size: u32,
    mut occupancy: Occupancy,
    count: usize,
) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        let cell = random_free_cell(rng, board_size, &occupancy);
        occupancy.insert(cell);
        cells.push(cell);
    }
    cells
}

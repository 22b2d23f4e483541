//! Greedy steering used to play unattended sessions.

use snake_core::{Cell, Direction, GameMode, Snapshot};

const HEADINGS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// Picks the heading that closes in on the nearest food without dying next tick.
///
/// Returns `None` when no safe move exists, leaving the current heading in place.
pub(crate) fn choose_direction(snapshot: &Snapshot) -> Option<Direction> {
    let head = snapshot.head()?;
    HEADINGS
        .into_iter()
        .filter(|direction| !direction.is_opposite(snapshot.direction))
        .filter_map(|direction| {
            let next = next_cell(snapshot, head, direction)?;
            is_safe(snapshot, next).then(|| (direction, distance_to_food(snapshot, next)))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(direction, _)| direction)
}

/// Key name a host would send for `direction`.
pub(crate) const fn key_for(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "ArrowUp",
        Direction::Down => "ArrowDown",
        Direction::Left => "ArrowLeft",
        Direction::Right => "ArrowRight",
    }
}

fn next_cell(snapshot: &Snapshot, head: Cell, direction: Direction) -> Option<Cell> {
    if snapshot.mode.wraps() {
        Some(head.wrapping_step(direction, snapshot.board_size))
    } else {
        head.step(direction, snapshot.board_size)
    }
}

fn is_safe(snapshot: &Snapshot, cell: Cell) -> bool {
    if snapshot.mode == GameMode::NoDie {
        return true;
    }
    !snapshot.snake.contains(&cell) && !snapshot.walls.contains(&cell)
}

fn distance_to_food(snapshot: &Snapshot, cell: Cell) -> u32 {
    snapshot
        .food
        .iter()
        .map(|food| food.x().abs_diff(cell.x()) + food.y().abs_diff(cell.y()))
        .min()
        .unwrap_or(0)
}

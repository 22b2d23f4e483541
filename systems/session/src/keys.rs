//! Mapping from raw host key names to snake headings.

use snake_core::Direction;

/// Translates a raw key name into a heading.
///
/// Arrow keys use their DOM `KeyboardEvent.key` names; `w`, `a`, `s` and `d`
/// are accepted in either case. Every other key yields `None`.
#[must_use]
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

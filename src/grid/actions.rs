//! Movement directions and grid positions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
///
/// Columns grow to the east, rows grow to the south. Coordinates are signed
/// so capture cells can live on the border wall ring without extra casing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridchase::grid::Position;
    ///
    /// let a = Position::new(1, 1);
    /// let b = Position::new(4, 3);
    /// assert_eq!(a.manhattan_distance(b), 5);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The position one step away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An agent action: move one cell in a compass direction, or stand still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// All actions in a fixed evaluation order.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The four moving directions, excluding `Stop`.
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Coordinate delta for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// The direction that undoes this one. `Stop` reverses to itself.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_round_trips_through_reverse() {
        let origin = Position::new(3, 3);
        for direction in Direction::MOVES {
            let there = origin.step(direction);
            assert_eq!(there.step(direction.reverse()), origin);
            assert_eq!(origin.manhattan_distance(there), 1);
        }
    }

    #[test]
    fn stop_stays_put() {
        let origin = Position::new(2, 5);
        assert_eq!(origin.step(Direction::Stop), origin);
    }
}

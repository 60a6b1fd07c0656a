//! Maze layout parsing and static board queries
//!
//! Layouts are parsed from ASCII art: `%` walls, `.` food, `o` energizers,
//! `P` the protagonist spawn, `G` adversary spawns, and spaces for open
//! floor. The border ring must be solid wall so movement and capture-cell
//! bookkeeping never have to reason about the void beyond the maze.

use serde::{Deserialize, Serialize};

use super::actions::{Direction, Position};
use crate::{Error, Result};

/// A small open arena with one adversary, handy for demos and tests.
pub const SMALL_LAYOUT: &str = "\
%%%%%%%
%P . .%
% %%% %
%. % .%
%   G %
%%%%%%%";

/// A medium maze with two adversaries and an energizer.
pub const MEDIUM_LAYOUT: &str = "\
%%%%%%%%%%%
%P.. %...o%
%.%%.%.%%.%
%.% ... %.%
%.%.%%%.%.%
%... G ...%
%.%.%%%.%.%
%.% .G. %.%
%.%%.%.%%.%
%o...%....%
%%%%%%%%%%%";

/// Immutable maze geometry: walls, initial food, spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    food: Vec<bool>,
    energizers: Vec<Position>,
    protagonist_spawn: Position,
    adversary_spawns: Vec<Position>,
}

impl Layout {
    /// Parse a layout from ASCII art.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty or ragged, contains an unknown
    /// tile, has zero or multiple `P` spawns, or has a non-wall border cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridchase::grid::Layout;
    ///
    /// let layout = Layout::parse(gridchase::grid::SMALL_LAYOUT).unwrap();
    /// assert_eq!(layout.adversary_spawns().len(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.is_empty() {
            return Err(Error::EmptyLayout);
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = vec![false; width * height];
        let mut food = vec![false; width * height];
        let mut energizers = Vec::new();
        let mut protagonist_spawn = None;
        let mut adversary_spawns = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let tiles: Vec<char> = row.chars().collect();
            if tiles.len() != width {
                return Err(Error::RaggedLayout {
                    row: y,
                    expected: width,
                    got: tiles.len(),
                });
            }
            for (x, tile) in tiles.iter().enumerate() {
                let index = y * width + x;
                match tile {
                    '%' => walls[index] = true,
                    '.' => food[index] = true,
                    'o' => energizers.push(Position::new(x as i32, y as i32)),
                    'P' => {
                        if protagonist_spawn.is_some() {
                            return Err(Error::DuplicateProtagonist);
                        }
                        protagonist_spawn = Some(Position::new(x as i32, y as i32));
                    }
                    'G' => adversary_spawns.push(Position::new(x as i32, y as i32)),
                    ' ' => {}
                    other => {
                        return Err(Error::UnknownTile {
                            tile: *other,
                            x,
                            y,
                        });
                    }
                }
            }
        }

        let layout = Layout {
            width,
            height,
            walls,
            food,
            energizers,
            protagonist_spawn: protagonist_spawn.ok_or(Error::MissingProtagonist)?,
            adversary_spawns,
        };
        layout.check_enclosed()?;
        Ok(layout)
    }

    fn check_enclosed(&self) -> Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let on_border = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                if on_border && !self.walls[y * self.width + x] {
                    return Err(Error::UnenclosedLayout { x, y });
                }
            }
        }
        Ok(())
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell is a wall. Positions outside the grid count as walls.
    pub fn is_wall(&self, position: Position) -> bool {
        if position.x < 0
            || position.y < 0
            || position.x as usize >= self.width
            || position.y as usize >= self.height
        {
            return true;
        }
        self.walls[position.y as usize * self.width + position.x as usize]
    }

    /// Whether the cell starts with a food pellet.
    pub fn has_food(&self, position: Position) -> bool {
        !self.is_wall(position)
            && self.food[position.y as usize * self.width + position.x as usize]
    }

    /// Initial food bitmap, row-major.
    pub(crate) fn initial_food(&self) -> Vec<bool> {
        self.food.clone()
    }

    /// Row-major index of an in-bounds, non-wall cell.
    pub(crate) fn cell_index(&self, position: Position) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    /// Energizer cells.
    pub fn energizers(&self) -> &[Position] {
        &self.energizers
    }

    /// Where the protagonist starts.
    pub fn protagonist_spawn(&self) -> Position {
        self.protagonist_spawn
    }

    /// Where each adversary starts.
    pub fn adversary_spawns(&self) -> &[Position] {
        &self.adversary_spawns
    }

    /// All non-wall cells, in row-major order.
    ///
    /// This is the support of every belief distribution over adversary
    /// positions; the fixed order makes even particle spreads deterministic.
    pub fn open_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.walls[y * self.width + x] {
                    cells.push(Position::new(x as i32, y as i32));
                }
            }
        }
        cells
    }

    /// Moving directions (no `Stop`) that do not run into a wall.
    pub fn open_directions(&self, position: Position) -> Vec<Direction> {
        Direction::MOVES
            .into_iter()
            .filter(|&d| !self.is_wall(position.step(d)))
            .collect()
    }

    /// Moving directions available to an adversary.
    ///
    /// Adversaries must keep moving and may not reverse their heading unless
    /// the maze forces it. A `Stop` heading (fresh spawn, or a hypothetical
    /// placement during inference) imposes no reversal restriction.
    pub fn adversary_directions(&self, position: Position, heading: Direction) -> Vec<Direction> {
        let mut actions = self.open_directions(position);
        if actions.len() > 1 && heading != Direction::Stop {
            let reverse = heading.reverse();
            actions.retain(|&d| d != reverse);
        }
        actions
    }

    /// Positions reachable by one protagonist action, including staying put.
    pub fn legal_neighbors(&self, position: Position) -> Vec<Position> {
        Direction::ALL
            .into_iter()
            .map(|d| position.step(d))
            .filter(|&p| !self.is_wall(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_builtin_layouts() {
        let small = Layout::parse(SMALL_LAYOUT).unwrap();
        assert_eq!(small.width(), 7);
        assert_eq!(small.height(), 6);
        assert_eq!(small.adversary_spawns().len(), 1);

        let medium = Layout::parse(MEDIUM_LAYOUT).unwrap();
        assert_eq!(medium.adversary_spawns().len(), 2);
        assert_eq!(medium.energizers().len(), 2);
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Layout::parse("%%%%\n%P%\n%%%%");
        assert!(matches!(result, Err(Error::RaggedLayout { row: 1, .. })));
    }

    #[test]
    fn rejects_unknown_tiles() {
        let result = Layout::parse("%%%%\n%P?%\n%%%%");
        assert!(matches!(
            result,
            Err(Error::UnknownTile { tile: '?', x: 2, y: 1 })
        ));
    }

    #[test]
    fn rejects_missing_protagonist() {
        let result = Layout::parse("%%%\n% %\n%%%");
        assert!(matches!(result, Err(Error::MissingProtagonist)));
    }

    #[test]
    fn rejects_open_border() {
        let result = Layout::parse("%%%\n%P \n%%%");
        assert!(matches!(result, Err(Error::UnenclosedLayout { .. })));
    }

    #[test]
    fn open_cells_exclude_walls() {
        let layout = Layout::parse(SMALL_LAYOUT).unwrap();
        for cell in layout.open_cells() {
            assert!(!layout.is_wall(cell));
        }
    }

    #[test]
    fn legal_neighbors_include_current_cell() {
        let layout = Layout::parse(SMALL_LAYOUT).unwrap();
        let spawn = layout.protagonist_spawn();
        assert!(layout.legal_neighbors(spawn).contains(&spawn));
    }

    #[test]
    fn out_of_bounds_counts_as_wall() {
        let layout = Layout::parse(SMALL_LAYOUT).unwrap();
        assert!(layout.is_wall(Position::new(-1, 0)));
        assert!(layout.is_wall(Position::new(0, 100)));
    }
}

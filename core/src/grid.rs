// SPDX-License-Identifier: MIT OR Apache-2.0

//! Padded stone grid

use crate::{Color, Coord, GameError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// State of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Black = 1,
    White = 2,
    OffBoard = 3,
}

impl Cell {
    /// Stone color held by this cell, if any
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
            Cell::Empty | Cell::OffBoard => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// Square grid of `size x size` playable cells surrounded by a one-cell
/// off-board border, so neighbor lookups never need a bounds branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Playable size (typically 9, 13, or 19)
    size: u8,
    /// Row-major cells including the border
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid; the size must lie in `5..=25`
    pub fn new(size: u8) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }
        let width = size as usize + 2;
        let mut grid = Self {
            size,
            cells: vec![Cell::OffBoard; width * width],
        };
        grid.reset();
        Ok(grid)
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Clear every playable cell; the border stays off-board
    pub fn reset(&mut self) {
        for y in 1..=self.size {
            for x in 1..=self.size {
                let idx = self.index(Coord::new(y, x));
                self.cells[idx] = Cell::Empty;
            }
        }
    }

    /// Check whether a coordinate lies on the playable area
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.is_valid(self.size)
    }

    /// Cell at the coordinate. Anything beyond the border reads as off-board.
    pub fn get(&self, coord: Coord) -> Cell {
        let limit = self.size + 1;
        if coord.y > limit || coord.x > limit {
            return Cell::OffBoard;
        }
        self.cells[self.index(coord)]
    }

    /// Write a playable cell. Writes outside the playable area are ignored
    /// in release builds so the border can never be overwritten.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        debug_assert!(self.in_bounds(coord), "write outside the board at {coord}");
        debug_assert!(cell != Cell::OffBoard, "off-board written at {coord}");
        if !self.in_bounds(coord) || cell == Cell::OffBoard {
            return;
        }
        let idx = self.index(coord);
        self.cells[idx] = cell;
    }

    /// Check whether the coordinate is a playable empty point
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Cell::Empty
    }

    /// Iterate over every playable coordinate, row by row
    pub fn points(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Coord::new(y, x)))
    }

    /// Iterate over every occupied point together with its stone color
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.points()
            .filter_map(|coord| self.get(coord).color().map(|color| (coord, color)))
    }

    /// Convert a coordinate to a vector index
    fn index(&self, coord: Coord) -> usize {
        coord.y as usize * (self.size as usize + 2) + coord.x as usize
    }
}

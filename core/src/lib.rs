// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weiqi Core - Board, Group and Move History Logic
//!
//! This crate provides the rules core for the game of Go:
//! - Padded stone grid with O(1) bounds and occupancy checks
//! - Incremental group/liberty tracking under placement and capture
//! - Zobrist position fingerprints with positional-repetition (ko) detection
//! - Transactional move history with undo/redo navigation
//! - A game session tying the above to turn order and pass/resign handling

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod game;
pub mod grid;
pub mod groups;
pub mod history;
pub mod zobrist;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{Board, MoveAnalysis};
pub use config::GameConfig;
pub use game::Game;
pub use grid::{Cell, Grid};
pub use groups::{GroupId, GroupTracker};
pub use history::{MoveHistory, MoveRecord};
pub use zobrist::{Fingerprint, FingerprintSnapshot, ZobristTable};

/// Smallest supported board size
pub const MIN_BOARD_SIZE: u8 = 5;
/// Largest supported board size
pub const MAX_BOARD_SIZE: u8 = 25;

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index of this color in per-color tables
    pub(crate) fn index(&self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = GameError;

    /// Numeric colors follow the cell encoding: 1 is black, 2 is white
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Color::Black),
            2 => Ok(Color::White),
            other => Err(GameError::InvalidColor(other)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Board coordinate on the playable area.
///
/// Both components are 1-based: `(1, 1)` is the top-left point and
/// `(size, size)` the bottom-right one. Row 0 and column 0 address the
/// off-board border of the padded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row (1-based)
    pub y: u8,
    /// Column (1-based)
    pub x: u8,
}

impl Coord {
    /// Create a new coordinate from a row and a column
    pub fn new(y: u8, x: u8) -> Self {
        Self { y, x }
    }

    /// Check if coordinate lies on the playable area of a board of given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        (1..=board_size).contains(&self.y) && (1..=board_size).contains(&self.x)
    }

    /// Orthogonal neighbors (north, east, south, west).
    ///
    /// Neighbors of an edge point land on the border of the padded grid.
    /// Stepping past row or column 0 wraps to 255, which a grid also reads
    /// as off-board.
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.y.wrapping_sub(1), self.x),
            Coord::new(self.y, self.x.wrapping_add(1)),
            Coord::new(self.y.wrapping_add(1), self.x),
            Coord::new(self.y, self.x.wrapping_sub(1)),
        ]
    }

    /// SGF notation: column letter then row letter, `a` being 1
    pub fn to_sgf(&self, board_size: u8) -> Result<String, GameError> {
        if !self.is_valid(board_size) {
            return Err(GameError::InvalidCoordinate);
        }
        let col = char::from(b'a' + self.x - 1);
        let row = char::from(b'a' + self.y - 1);
        Ok(format!("{col}{row}"))
    }

    /// Parse SGF notation produced by [`Coord::to_sgf`]
    pub fn from_sgf(sgf: &str, board_size: u8) -> Result<Self, GameError> {
        let bytes = sgf.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(GameError::InvalidCoordinate);
        }
        let coord = Coord::new(bytes[1] - b'a' + 1, bytes[0] - b'a' + 1);
        if !coord.is_valid(board_size) {
            return Err(GameError::InvalidCoordinate);
        }
        Ok(coord)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.y, self.x)
    }
}

/// Represents a move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the specified coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
    /// Resign the game
    Resign,
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board size outside the supported range
    #[error("Board size {0} must be between 5 and 25")]
    InvalidBoardSize(u8),

    /// The coordinate is outside the board
    #[error("Invalid coordinate")]
    InvalidCoordinate,

    /// The position is already occupied
    #[error("Position already occupied")]
    OccupiedPosition,

    /// The move would result in self-capture (suicide)
    #[error("Move would result in self-capture")]
    SelfCapture,

    /// The move recreates an earlier position
    #[error("Move violates ko rule")]
    KoViolation,

    /// Seed that a TOML integer cannot hold
    #[error("Zobrist seed {0} exceeds the largest TOML integer")]
    InvalidSeed(u64),

    /// Numeric color that is neither black nor white
    #[error("Invalid color value {0}")]
    InvalidColor(u8),

    /// Undo, redo or peek past either end of the history
    #[error("No move available in history")]
    EmptyHistory,

    /// Group id unknown to the tracker; indicates a tracker bug
    #[error("Unknown group {0}")]
    UnknownGroup(GroupId),

    /// The game already ended by two passes or a resignation
    #[error("Game is already over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_numeric_value() {
        assert_eq!(Color::try_from(1), Ok(Color::Black));
        assert_eq!(Color::try_from(2), Ok(Color::White));
        assert_eq!(Color::try_from(0), Err(GameError::InvalidColor(0)));
        assert_eq!(Color::try_from(3), Err(GameError::InvalidColor(3)));
    }

    #[test]
    fn sgf_coordinates() {
        assert_eq!(Coord::new(1, 2).to_sgf(9).unwrap(), "ba");
        assert_eq!(Coord::from_sgf("ba", 9).unwrap(), Coord::new(1, 2));
        assert_eq!(Coord::new(10, 1).to_sgf(9), Err(GameError::InvalidCoordinate));
        assert_eq!(Coord::from_sgf("jj", 9), Err(GameError::InvalidCoordinate));
        assert_eq!(Coord::from_sgf("a", 9), Err(GameError::InvalidCoordinate));
        assert_eq!(Coord::from_sgf("A1", 9), Err(GameError::InvalidCoordinate));
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let n = Coord::new(3, 3).neighbors();
        assert!(n.contains(&Coord::new(2, 3)));
        assert!(n.contains(&Coord::new(4, 3)));
        assert!(n.contains(&Coord::new(3, 2)));
        assert!(n.contains(&Coord::new(3, 4)));
    }

    #[test]
    fn neighbors_of_border_point_do_not_panic() {
        let n = Coord::new(0, 0).neighbors();
        assert_eq!(n[0], Coord::new(255, 0));
        assert_eq!(n[3], Coord::new(0, 255));
    }
}

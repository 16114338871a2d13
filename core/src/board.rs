// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board state and move legality
//!
//! A [`Board`] bundles the padded grid, the group tracker, the position
//! fingerprint and the capture counts. They only change together through
//! [`Board::place_stone`], which first analyzes a move without touching any
//! state and only then applies it, so a rejected move never leaves anything
//! half updated.

use crate::grid::{Cell, Grid};
use crate::groups::{Group, GroupId, GroupTracker};
use crate::zobrist::{Fingerprint, FingerprintSnapshot, ZobristTable};
use crate::{Color, Coord, GameError};
use std::fmt;

/// Outcome of a successful legality check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAnalysis {
    /// Opponent groups whose last liberty is the target point
    pub captured_groups: Vec<GroupId>,
    /// Empty points next to the target
    pub liberties: Vec<Coord>,
    /// Friendly groups the new stone joins
    pub friendly_groups: Vec<GroupId>,
    /// Fingerprint of the position after the move
    pub fingerprint: u64,
}

/// Represents the Go board with stones, groups and position history
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    groups: GroupTracker,
    fingerprint: Fingerprint,
    /// Stones captured by (Black, White)
    captures: [u32; 2],
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Result<Self, GameError> {
        Self::with_seed(size, 0)
    }

    /// Create a new empty board whose fingerprint keys come from `seed`
    pub fn with_seed(size: u8, seed: u64) -> Result<Self, GameError> {
        let grid = Grid::new(size)?;
        Ok(Self {
            grid,
            groups: GroupTracker::new(),
            fingerprint: Fingerprint::new(ZobristTable::new(size, seed)),
            captures: [0, 0],
        })
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.grid.size()
    }

    /// Read-only access to the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell state at the coordinate
    pub fn cell(&self, coord: Coord) -> Cell {
        self.grid.get(coord)
    }

    /// Get the stone at the specified coordinate
    pub fn stone(&self, coord: Coord) -> Option<Color> {
        self.grid.get(coord).color()
    }

    /// Number of opponent stones captured by `color`
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    /// Current position fingerprint
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint.value()
    }

    /// Fingerprint computed from scratch over the grid.
    ///
    /// Always equal to [`Board::fingerprint`]; kept as an independent oracle.
    pub fn recompute_fingerprint(&self) -> u64 {
        self.fingerprint.table().hash_grid(&self.grid)
    }

    /// Whether a fingerprint value already occurred in this game
    pub fn has_seen(&self, fingerprint: u64) -> bool {
        self.fingerprint.contains(fingerprint)
    }

    /// Deep copy of the fingerprint and repetition history
    pub fn fingerprint_snapshot(&self) -> FingerprintSnapshot {
        self.fingerprint.snapshot()
    }

    /// Read-only access to the group tracker
    pub fn groups(&self) -> &GroupTracker {
        &self.groups
    }

    /// Group containing the stone at `coord`
    pub fn group_at(&self, coord: Coord) -> Option<GroupId> {
        self.groups.group_at(coord)
    }

    /// Look up a group by id
    pub fn group(&self, id: GroupId) -> Result<&Group, GameError> {
        self.groups.group(id)
    }

    /// Clear stones, groups, captures and position history
    pub fn reset(&mut self) {
        self.grid.reset();
        self.groups.clear();
        self.fingerprint.reset();
        self.captures = [0, 0];
        tracing::debug!(size = self.size(), "board reset");
    }

    /// Check a move without modifying the board
    pub fn analyze(&self, coord: Coord, color: Color) -> Result<MoveAnalysis, GameError> {
        if !self.grid.in_bounds(coord) {
            return Err(GameError::InvalidCoordinate);
        }
        if !self.grid.is_empty(coord) {
            return Err(GameError::OccupiedPosition);
        }

        let opponent = color.opposite();
        let mut captured_groups = Vec::new();
        let mut liberties = Vec::new();
        let mut friendly_groups = Vec::new();

        for n in coord.neighbors() {
            let cell = self.grid.get(n);
            if cell == Cell::Empty {
                liberties.push(n);
                continue;
            }
            let Some(id) = self.groups.group_at(n) else {
                continue;
            };
            if cell.color() == Some(opponent) {
                if self.groups.liberties(id)?.len() == 1 && !captured_groups.contains(&id) {
                    captured_groups.push(id);
                }
            } else if !friendly_groups.contains(&id) {
                friendly_groups.push(id);
            }
        }

        // A stone without an empty neighbor must capture to stay on the board
        if liberties.is_empty() && captured_groups.is_empty() {
            return Err(GameError::SelfCapture);
        }

        let table = self.fingerprint.table();
        let mut fingerprint = self.fingerprint.value() ^ table.key(coord, color);
        for id in &captured_groups {
            for stone in self.groups.stones(*id)? {
                fingerprint ^= table.key(*stone, opponent);
            }
        }
        if self.fingerprint.contains(fingerprint) {
            return Err(GameError::KoViolation);
        }

        Ok(MoveAnalysis {
            captured_groups,
            liberties,
            friendly_groups,
            fingerprint,
        })
    }

    /// Check if placing a stone at `coord` is legal
    pub fn is_valid_move(&self, coord: Coord, color: Color) -> Result<(), GameError> {
        self.analyze(coord, color).map(|_| ())
    }

    /// Place a stone and resolve captures.
    ///
    /// Returns the captured coordinates in ascending order. On error the
    /// board is left exactly as it was.
    pub fn place_stone(&mut self, coord: Coord, color: Color) -> Result<Vec<Coord>, GameError> {
        let analysis = match self.analyze(coord, color) {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::debug!(%coord, %color, %err, "move rejected");
                return Err(err);
            }
        };
        self.apply(coord, color, analysis)
    }

    fn apply(
        &mut self,
        coord: Coord,
        color: Color,
        analysis: MoveAnalysis,
    ) -> Result<Vec<Coord>, GameError> {
        let opponent = color.opposite();

        let mut captured = Vec::new();
        for id in analysis.captured_groups {
            let group = self.groups.remove_group(id)?;
            for stone in group.stones() {
                self.grid.set(*stone, Cell::Empty);
                self.fingerprint.toggle(*stone, opponent);
                captured.push(*stone);
            }
        }
        self.groups.release_liberties(&captured);
        self.captures[color.index()] += captured.len() as u32;

        self.grid.set(coord, Cell::from(color));
        self.fingerprint.toggle(coord, color);

        self.groups
            .merge_groups(&analysis.friendly_groups, coord, color, &self.grid)?;
        let dead = self.groups.update_adjacent_liberties(coord, color, &self.grid)?;
        debug_assert!(dead.is_empty(), "uncaptured groups without liberties: {dead:?}");

        self.fingerprint.commit();
        debug_assert_eq!(self.fingerprint.value(), analysis.fingerprint);

        captured.sort_unstable();
        tracing::debug!(%coord, %color, captured = captured.len(), "stone placed");
        Ok(captured)
    }

    /// All legal placements for `color`
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        let table = self.fingerprint.table();
        self.grid
            .points()
            .filter(|coord| self.grid.is_empty(*coord))
            .filter(|coord| {
                let isolated = coord.neighbors().iter().all(|n| {
                    matches!(self.grid.get(*n), Cell::Empty | Cell::OffBoard)
                });
                if isolated {
                    // No capture or suicide possible; only repetition matters
                    let next = self.fingerprint.value() ^ table.key(*coord, color);
                    !self.fingerprint.contains(next)
                } else {
                    self.analyze(*coord, color).is_ok()
                }
            })
            .collect()
    }

    /// Take back a placement recorded by the move history.
    ///
    /// Grid, captures and fingerprint come back exactly; groups are
    /// rebuilt from the restored grid.
    pub(crate) fn revert_placement(
        &mut self,
        coord: Coord,
        color: Color,
        captured: &[Coord],
        before: &FingerprintSnapshot,
    ) {
        let opponent = color.opposite();
        self.grid.set(coord, Cell::Empty);
        for stone in captured {
            self.grid.set(*stone, Cell::from(opponent));
        }
        let count = &mut self.captures[color.index()];
        *count = count.saturating_sub(captured.len() as u32);
        self.fingerprint.restore(before);
        self.groups.rebuild(&self.grid);
    }

    /// Play a recorded placement again starting from its saved fingerprint
    pub(crate) fn replay_placement(
        &mut self,
        coord: Coord,
        color: Color,
        captured: &[Coord],
        before: &FingerprintSnapshot,
    ) {
        let opponent = color.opposite();
        self.fingerprint.restore(before);

        self.grid.set(coord, Cell::from(color));
        self.fingerprint.toggle(coord, color);
        for stone in captured {
            self.grid.set(*stone, Cell::Empty);
            self.fingerprint.toggle(*stone, opponent);
        }
        self.captures[color.index()] += captured.len() as u32;
        self.fingerprint.commit();
        self.groups.rebuild(&self.grid);
    }

    /// Restore only the fingerprint state, used for passes and resignations
    pub(crate) fn restore_fingerprint(&mut self, before: &FingerprintSnapshot) {
        self.fingerprint.restore(before);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 1..=self.size() {
            for x in 1..=self.size() {
                let ch = match self.grid.get(Coord::new(y, x)) {
                    Cell::Black => 'B',
                    Cell::White => 'W',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, stones: &[(u8, u8, Color)]) {
        for &(y, x, color) in stones {
            board.place_stone(Coord::new(y, x), color).unwrap();
        }
    }

    #[test]
    fn board_creation() {
        let board = Board::new(19).unwrap();
        assert_eq!(board.size(), 19);
        assert_eq!(board.stone(Coord::new(1, 1)), None);
        assert_eq!(board.fingerprint(), 0);
        assert!(Board::new(3).is_err());
    }

    #[test]
    fn analysis_does_not_mutate() {
        let mut board = Board::new(9).unwrap();
        play(&mut board, &[(1, 2, Color::Black), (2, 1, Color::Black)]);
        let before = board.fingerprint();

        assert_eq!(
            board.analyze(Coord::new(1, 1), Color::White),
            Err(GameError::SelfCapture)
        );
        assert_eq!(
            board.analyze(Coord::new(1, 2), Color::White),
            Err(GameError::OccupiedPosition)
        );
        assert_eq!(
            board.analyze(Coord::new(0, 2), Color::White),
            Err(GameError::InvalidCoordinate)
        );
        assert_eq!(
            board.analyze(Coord::new(10, 2), Color::White),
            Err(GameError::InvalidCoordinate)
        );
        assert_eq!(board.fingerprint(), before);
        assert_eq!(board.stone(Coord::new(1, 1)), None);
    }

    #[test]
    fn analysis_reports_captures_and_liberties() {
        let mut board = Board::new(9).unwrap();
        play(
            &mut board,
            &[
                (4, 4, Color::White),
                (4, 3, Color::Black),
                (3, 4, Color::Black),
                (5, 4, Color::Black),
            ],
        );
        let analysis = board.analyze(Coord::new(4, 5), Color::Black).unwrap();
        assert_eq!(analysis.captured_groups.len(), 1);
        assert_eq!(analysis.liberties.len(), 3);
        assert!(analysis.friendly_groups.is_empty());
    }

    #[test]
    fn filling_own_eye_is_self_capture() {
        let mut board = Board::new(9).unwrap();
        play(&mut board, &[(1, 2, Color::Black), (2, 1, Color::Black), (2, 2, Color::Black)]);
        let before = board.fingerprint();

        assert_eq!(
            board.place_stone(Coord::new(1, 1), Color::Black),
            Err(GameError::SelfCapture)
        );
        assert_eq!(board.stone(Coord::new(1, 1)), None);
        assert_eq!(board.fingerprint(), before);
        assert!(!board.legal_moves(Color::Black).contains(&Coord::new(1, 1)));
    }

    #[test]
    fn capture_frees_liberties_for_neighbors() {
        let mut board = Board::new(9).unwrap();
        play(&mut board, &[(1, 1, Color::White), (1, 2, Color::Black)]);
        let captured = board.place_stone(Coord::new(2, 1), Color::Black).unwrap();
        assert_eq!(captured, vec![Coord::new(1, 1)]);
        assert_eq!(board.captures(Color::Black), 1);

        let id = board.group_at(Coord::new(1, 2)).unwrap();
        assert!(board.group(id).unwrap().liberties().contains(&Coord::new(1, 1)));
        let id = board.group_at(Coord::new(2, 1)).unwrap();
        assert!(board.group(id).unwrap().liberties().contains(&Coord::new(1, 1)));
    }

    #[test]
    fn legal_moves_on_empty_board() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.legal_moves(Color::Black).len(), 25);
    }

    #[test]
    fn display_shows_stones() {
        let mut board = Board::new(5).unwrap();
        play(&mut board, &[(1, 1, Color::Black), (1, 2, Color::White)]);
        let text = board.to_string();
        assert_eq!(text.lines().next(), Some("B W . . . "));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn reset_clears_everything() {
        let mut board = Board::new(9).unwrap();
        play(&mut board, &[(1, 1, Color::White), (1, 2, Color::Black), (2, 1, Color::Black)]);
        board.reset();
        assert_eq!(board.grid().stones().count(), 0);
        assert!(board.groups().is_empty());
        assert_eq!(board.captures(Color::Black), 0);
        assert_eq!(board.fingerprint(), 0);
        assert_eq!(board.legal_moves(Color::White).len(), 81);
    }
}

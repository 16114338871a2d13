// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session: one board, its move history and turn order
//!
//! Turn order, the pass counter and the end-of-game state are all derived
//! from the moves currently in effect, so they follow undo and redo without
//! separate bookkeeping.

use crate::board::Board;
use crate::config::GameConfig;
use crate::history::{MoveHistory, MoveRecord};
use crate::{Color, Coord, GameError, Move};

/// Represents a Go game in progress
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: MoveHistory,
}

impl Game {
    /// Create a new game with the specified board size
    pub fn new(board_size: u8) -> Result<Self, GameError> {
        Self::with_config(&GameConfig::with_board_size(board_size))
    }

    /// Create a new game from a configuration
    pub fn with_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            board: Board::with_seed(config.board_size, config.zobrist_seed)?,
            history: MoveHistory::new(),
        })
    }

    /// The board as of the current history position
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The recorded moves and cursor
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Color {
        self.history
            .peek()
            .map_or(Color::Black, |record| record.color.opposite())
    }

    /// Moves in effect, oldest first
    pub fn moves(&self) -> Vec<Move> {
        self.history.applied_records().iter().map(|r| r.mv).collect()
    }

    /// Number of passes at the end of the moves in effect
    pub fn consecutive_passes(&self) -> usize {
        self.history
            .applied_records()
            .iter()
            .rev()
            .take_while(|record| record.mv == Move::Pass)
            .count()
    }

    /// Game ends after two consecutive passes or resignation
    pub fn is_over(&self) -> bool {
        self.consecutive_passes() >= 2 || self.resigned().is_some()
    }

    /// The opponent of a player who resigned.
    ///
    /// A game that ended by passing has no winner here; counting the score
    /// is up to the caller.
    pub fn winner(&self) -> Option<Color> {
        self.resigned().map(|color| color.opposite())
    }

    fn resigned(&self) -> Option<Color> {
        self.history
            .peek()
            .filter(|record| record.mv == Move::Resign)
            .map(|record| record.color)
    }

    /// Place a stone for the current player; returns the captured stones
    pub fn play(&mut self, coord: Coord) -> Result<Vec<Coord>, GameError> {
        let color = self.current_player();
        let record = self.push(color, Move::Place(coord))?;
        Ok(record.captured.clone())
    }

    /// Pass the turn
    pub fn pass(&mut self) -> Result<(), GameError> {
        let color = self.current_player();
        self.push(color, Move::Pass)?;
        if self.is_over() {
            tracing::info!("game ended by consecutive passes");
        }
        Ok(())
    }

    /// Resign the game for `color`
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        self.push(color, Move::Resign)?;
        tracing::info!(%color, "player resigned");
        Ok(())
    }

    fn push(&mut self, color: Color, mv: Move) -> Result<&MoveRecord, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.history.push(&mut self.board, color, mv)
    }

    /// Undo the last move in effect
    pub fn undo(&mut self) -> Result<Move, GameError> {
        self.history
            .pop(&mut self.board)
            .map(|record| record.mv)
            .ok_or(GameError::EmptyHistory)
    }

    /// Redo the next recorded move
    pub fn redo(&mut self) -> Result<Move, GameError> {
        self.history
            .forward(&mut self.board)
            .map(|record| record.mv)
            .ok_or(GameError::EmptyHistory)
    }

    /// Jump back to the empty board
    pub fn to_start(&mut self) -> usize {
        self.history.to_root(&mut self.board)
    }

    /// Jump to the last recorded move
    pub fn to_end(&mut self) -> usize {
        self.history.to_end(&mut self.board)
    }

    /// Legal placements for the current player; none once the game is over
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.legal_moves(self.current_player())
    }

    /// Start over on an empty board of the same size
    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
    }
}

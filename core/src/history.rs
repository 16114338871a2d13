// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move history with undo/redo navigation
//!
//! Each record keeps what is needed to invert its move exactly: the stones
//! it captured and a deep copy of the fingerprint state from just before it
//! was applied. Undo and redo only move the cursor; records disappear only
//! when a new move is pushed while later moves are still redoable.

use crate::board::Board;
use crate::zobrist::FingerprintSnapshot;
use crate::{Color, Coord, GameError, Move};
use serde::{Deserialize, Serialize};

/// A played move together with the data needed to undo it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The move that was made
    pub mv: Move,
    /// The player who made the move
    pub color: Color,
    /// Opponent stones removed by the move, in ascending order
    pub captured: Vec<Coord>,
    /// Fingerprint state right before the move
    pub before: FingerprintSnapshot,
}

/// Linear list of moves plus a cursor over them
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
    /// Number of records currently in effect on the board
    applied: usize,
}

impl MoveHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded moves, redoable ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of moves in effect on the board
    pub fn current_position(&self) -> usize {
        self.applied
    }

    /// Index of the last move in effect, `None` at the initial position
    pub fn current_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// Every recorded move
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Moves in effect on the board, oldest first
    pub fn applied_records(&self) -> &[MoveRecord] {
        &self.records[..self.applied]
    }

    /// Forget every record
    pub fn clear(&mut self) {
        self.records.clear();
        self.applied = 0;
    }

    /// Apply a move to the board and record it.
    ///
    /// An illegal placement is returned as an error and leaves both the
    /// board and the history untouched. Otherwise every redoable record is
    /// dropped before the new one is appended.
    pub fn push(
        &mut self,
        board: &mut Board,
        color: Color,
        mv: Move,
    ) -> Result<&MoveRecord, GameError> {
        let before = board.fingerprint_snapshot();
        let captured = match mv {
            Move::Place(coord) => board.place_stone(coord, color)?,
            Move::Pass | Move::Resign => Vec::new(),
        };

        if self.records.len() > self.applied {
            tracing::debug!(
                discarded = self.records.len() - self.applied,
                "dropping redoable moves"
            );
            self.records.truncate(self.applied);
        }
        self.records.push(MoveRecord {
            mv,
            color,
            captured,
            before,
        });
        self.applied += 1;
        Ok(&self.records[self.applied - 1])
    }

    /// Undo the last move in effect. Returns `None` at the initial position.
    pub fn pop(&mut self, board: &mut Board) -> Option<&MoveRecord> {
        self.applied = self.applied.checked_sub(1)?;
        let record = &self.records[self.applied];
        match record.mv {
            Move::Place(coord) => {
                board.revert_placement(coord, record.color, &record.captured, &record.before)
            }
            Move::Pass | Move::Resign => board.restore_fingerprint(&record.before),
        }
        tracing::debug!(position = self.applied, mv = ?record.mv, "move undone");
        Some(record)
    }

    /// Redo the next recorded move. Returns `None` when nothing is redoable.
    pub fn forward(&mut self, board: &mut Board) -> Option<&MoveRecord> {
        let record = self.records.get(self.applied)?;
        if let Move::Place(coord) = record.mv {
            board.replay_placement(coord, record.color, &record.captured, &record.before);
        }
        self.applied += 1;
        tracing::debug!(position = self.applied, mv = ?record.mv, "move redone");
        Some(record)
    }

    /// Undo every move; returns how many were undone
    pub fn to_root(&mut self, board: &mut Board) -> usize {
        let mut undone = 0;
        while self.pop(board).is_some() {
            undone += 1;
        }
        undone
    }

    /// Redo every move; returns how many were redone
    pub fn to_end(&mut self, board: &mut Board) -> usize {
        let mut redone = 0;
        while self.forward(board).is_some() {
            redone += 1;
        }
        redone
    }

    /// Last move in effect
    pub fn peek(&self) -> Option<&MoveRecord> {
        self.current_index().map(|i| &self.records[i])
    }

    /// Next redoable move
    pub fn peek_next(&self) -> Option<&MoveRecord> {
        self.records.get(self.applied)
    }
}

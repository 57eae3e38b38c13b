// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::check::{is_checkmate, is_in_check, leaves_in_check, legal_destinations};
use super::material::{Color, Piece};
use super::moves::{is_legal_geometry, Move};
use super::square::{Mask, ParseError, Square};
use super::Board;
use crate::game::{Command, GameResult, Status, WinReason};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid input: {0}")]
    Parse(#[from] ParseError),
    #[error("No piece at starting position {0}")]
    NoPiece(Square),
    #[error("Invalid move: wrong piece, it's {0}'s turn")]
    WrongTurn(Color),
    #[error("Invalid move for this piece: {0} to {1}")]
    IllegalMove(Square, Square),
    #[error("Move leaves king in check")]
    SelfCheck,
    #[error("The game is already over")]
    GameOver,
}
use MoveError::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    AwaitingInput,
    GameOver(GameResult),
}

/// A game in progress: the live board, whose turn it is, and whether the
/// game has been decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::White)
    }

    /// Starts from an arbitrary position. A side with no king, or one that
    /// is already mated, has lost before the first move. When both sides
    /// qualify the side to move is the loser.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut game = Self {
            board,
            turn,
            state: GameState::AwaitingInput,
        };
        if let Some(result) = game.decide(!turn).or_else(|| game.decide(turn)) {
            game.state = GameState::GameOver(result);
        }
        game
    }

    /// Reconstructs a game by submitting each command in turn. Stops early
    /// at a `quit` command.
    pub fn replay<I, S>(commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut game = Self::new();
        for (i, command) in commands.into_iter().enumerate() {
            let command = command.as_ref();
            let status = game
                .submit(command)
                .with_context(|| format!("move {} ({:?}) was rejected", i + 1, command))?;
            if status == Status::Quit {
                break;
            }
        }
        Ok(game)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            GameState::GameOver(result) => Some(result),
            GameState::AwaitingInput => None,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(&self.board, self.turn)
    }

    pub fn status(&self) -> Status {
        match self.state {
            GameState::GameOver(result) => Status::GameOver(result),
            GameState::AwaitingInput => Status::Turn(self.turn),
        }
    }

    /// Legal destinations for the piece on `from`. Empty unless the piece
    /// belongs to the side to move and the game is still going.
    pub fn move_destinations(&self, from: Square) -> Mask {
        match self.board[from] {
            Some(piece) if !self.is_over() && piece.color() == self.turn => {
                legal_destinations(&self.board, from)
            }
            _ => Mask::empty(),
        }
    }

    /// Handles one line of player input such as `"e2 e4"` or `"quit"`.
    /// A rejected command leaves the game exactly as it was.
    pub fn submit(&mut self, input: &str) -> Result<Status, MoveError> {
        match Command::parse(input) {
            Ok(Command::Quit) => {
                info!("quit requested");
                Ok(Status::Quit)
            }
            Ok(Command::Move(mv)) => self.submit_move(mv),
            Err(err) => {
                debug!(input, reason = %err, "input rejected");
                Err(err.into())
            }
        }
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<Status, MoveError> {
        if let Err(err) = self.validate_move(mv) {
            debug!(%mv, turn = %self.turn, reason = %err, "move rejected");
            return Err(err);
        }
        Ok(self.commit(mv))
    }

    /// Checks `mv` against the live board without changing anything.
    pub fn validate_move(&self, mv: Move) -> Result<Piece, MoveError> {
        if self.is_over() {
            return Err(GameOver);
        }
        let piece = self.board[mv.from].ok_or(NoPiece(mv.from))?;
        if piece.color() != self.turn {
            return Err(WrongTurn(self.turn));
        }
        if !is_legal_geometry(mv.from, mv.to, &self.board, piece) {
            return Err(IllegalMove(mv.from, mv.to));
        }
        if leaves_in_check(&self.board, mv, self.turn) {
            return Err(SelfCheck);
        }
        Ok(piece)
    }

    fn commit(&mut self, mv: Move) -> Status {
        let captured = self.board.apply_move(mv.from, mv.to);
        debug!(%mv, color = %self.turn, captured = ?captured.map(|p| p.kind()), "move committed");
        if let Some(result) = self.decide(self.turn) {
            info!(winner = %result.winner, reason = ?result.reason, "game over");
            self.state = GameState::GameOver(result);
            return Status::GameOver(result);
        }
        self.turn = !self.turn;
        Status::Turn(self.turn)
    }

    fn decide(&self, winner: Color) -> Option<GameResult> {
        let loser = !winner;
        if self.board.find_king(loser).is_none() {
            Some(GameResult::new(winner, WinReason::KingCaptured))
        } else if is_checkmate(&self.board, loser) {
            Some(GameResult::new(winner, WinReason::CheckMate))
        } else {
            None
        }
    }
}

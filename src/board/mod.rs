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

//! Two-player chess board and rules engine
//!
//! A _board_ holds the 8-by-8 grid of pieces; a _game_ owns one board
//! plus the side to move and drives it one submitted move at a time.
//! The following features are supported:
//!
//! [x] Piece movement for pawns, knights, bishops, rooks, queens and kings
//! [x] Pawn double advance from a pawn's first move
//! [x] Reject moves that leave the mover's own king in check
//! [x] Checkmate detection by exhaustive search
//! [ ] Castling
//! [ ] En passant
//! [ ] Pawn promotion
//! [ ] Draws (stalemate, repetition, fifty-move rule)
//!
//! Some of the key abstractions include:
//!
//! * A `Square` names one of the 64 squares (`A8` .. `H1`). Squares are
//!   laid out row by row from Black's back rank, so `E2` is row 6,
//!   column 4. `Square::parse` reads names such as `"e2"`.
//!
//! * A `Piece` is a value: a `PieceKind`, a `Color` and a flag telling
//!   whether the piece has moved (only pawns care).
//!
//! * A `Board` is the grid itself. `Board::apply_move` moves a piece
//!   without checking anything; the free functions `is_legal_geometry`,
//!   `is_in_check` and `is_checkmate` read a board and never modify it.
//!
//! * A `Game` owns the live board and the side to move. `Game::submit`
//!   takes a raw command such as `"e2 e4"` and either commits the move or
//!   reports why it was rejected, leaving the game untouched.
//!

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;

mod check;
mod material;
mod moves;
mod play;
mod square;

pub use check::*;
pub use material::*;
pub use moves::*;
pub use play::*;
pub use square::*;

use PieceKind::*;
use Rank::*;

const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board([Option<Piece>; 64]);

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self([None; 64])
    }

    /// The standard starting arrangement.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for file in File::iter() {
            let kind = BACK_RANK[file.to_index()];
            board.place(Square::new(file, Rank8), Piece::black(kind));
            board.place(Square::new(file, Rank7), Piece::BP);
            board.place(Square::new(file, Rank2), Piece::WP);
            board.place(Square::new(file, Rank1), Piece::white(kind));
        }
        board
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Piece> {
        self.0[square.to_index()]
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.0[square.to_index()].is_none()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        !self.is_vacant(square)
    }

    /// Puts `piece` on `square`, returning whatever was there.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.0[square.to_index()].replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.0[square.to_index()].take()
    }

    /// Moves the piece on `from` to `to` and marks it as moved. Whatever
    /// stood on `to` is captured and returned. No legality checks are made;
    /// an empty `from` leaves the board unchanged.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.remove(from)?;
        self.place(to, piece.moved())
    }

    /// All occupied squares, from a8 through h1.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.contents(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Where `color`'s king stands, or `None` when it has no king.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind().is_king())
            .map(|(square, _)| square)
    }

    /// Uppercase letters for White, lowercase for Black, `None` if empty.
    pub fn symbol(&self, square: Square) -> Option<char> {
        self.contents(square).map(|piece| piece.symbol())
    }

    /// The contents of every square as `(kind, color)` pairs, row by row.
    pub fn snapshot(&self) -> [[Option<(PieceKind, Color)>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for (square, piece) in self.pieces() {
            rows[square.row()][square.col()] = Some((piece.kind(), piece.color()));
        }
        rows
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "  a b c d e f g h";
        writeln!(f, "{}", FILES)?;
        for rank in Rank::iter() {
            write!(f, "{} ", rank)?;
            for file in File::iter() {
                let symbol = self.symbol(Square::new(file, rank)).unwrap_or('.');
                write!(f, "{} ", symbol)?;
            }
            writeln!(f, "{}", rank)?;
        }
        write!(f, "{}", FILES)
    }
}

/// Serialized as the 64 squares in index order, `None` for empty ones.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let squares: Vec<Option<Piece>> = Vec::deserialize(deserializer)?;
        let squares: [Option<Piece>; 64] = squares.try_into().map_err(|v: Vec<_>| {
            serde::de::Error::invalid_length(v.len(), &"exactly 64 squares")
        })?;
        Ok(Self(squares))
    }
}

#[cfg(test)]
impl Board {
    pub fn set_contents(mut self, square: Square, value: Option<Piece>) -> Self {
        self.0[square.to_index()] = value;
        self
    }
}

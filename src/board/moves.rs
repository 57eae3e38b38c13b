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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

use super::material::{Piece, PieceKind};
use super::square::{between, Mask, Offset, ParseError, Square};
use super::Board;

use PieceKind::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses two whitespace-separated square names, e.g. `"e2 e4"`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut tokens = text.split_whitespace();
        let (Some(from), Some(to), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ParseError::InvalidFormat(text.trim().to_string()));
        };
        Ok(Self::new(Square::parse(from)?, Square::parse(to)?))
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

/// Whether `piece`, standing on `from`, may travel to `to` given the pieces
/// on `board`. Only movement patterns and blocking pieces are considered;
/// whether the move exposes the mover's own king is not.
pub fn is_legal_geometry(from: Square, to: Square, board: &Board, piece: Piece) -> bool {
    if let Some(target) = board[to] {
        if target.color() == piece.color() {
            return false;
        }
    }
    match piece.kind() {
        Pawn => is_legal_pawn_move(from, to, board, piece),
        Rook => is_legal_rook_move(from, to, board),
        Knight => KNIGHT_MOVES[from].contains(to),
        Bishop => is_legal_bishop_move(from, to, board),
        Queen => is_legal_rook_move(from, to, board) || is_legal_bishop_move(from, to, board),
        King => KING_MOVES[from].contains(to),
    }
}

fn is_legal_pawn_move(from: Square, to: Square, board: &Board, piece: Piece) -> bool {
    let forward = piece.color().forward();
    let Offset { x, y } = to - from;
    if x == 0 {
        if y == forward {
            return board.is_vacant(to);
        }
        if y == 2 * forward && !piece.has_moved() {
            return board.is_vacant(to) && is_lane_clear(from, to, board);
        }
        false
    } else {
        // diagonal captures only; the destination color was checked by the caller
        x.abs() == 1 && y == forward && board.is_occupied(to)
    }
}

fn is_legal_rook_move(from: Square, to: Square, board: &Board) -> bool {
    let Offset { x, y } = to - from;
    (x == 0) != (y == 0) && is_lane_clear(from, to, board)
}

fn is_legal_bishop_move(from: Square, to: Square, board: &Board) -> bool {
    let Offset { x, y } = to - from;
    x != 0 && x.abs() == y.abs() && is_lane_clear(from, to, board)
}

#[inline]
fn is_lane_clear(from: Square, to: Square, board: &Board) -> bool {
    between(from, to).iter().all(|square| board.is_vacant(square))
}

/// Every square `piece` on `from` could reach by geometry alone.
pub fn geometric_destinations(from: Square, board: &Board, piece: Piece) -> Mask {
    Mask::from_squares(Square::iter().filter(|&to| is_legal_geometry(from, to, board, piece)))
}

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-1, -1),
        Offset::new(0, -1),
        Offset::new(1, -1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
        Offset::new(-1, 1),
        Offset::new(0, 1),
        Offset::new(1, 1),
    ];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

// Copyright 2026 Tobin Edwards
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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece standing on the board. Pieces are plain values: capturing one
/// simply overwrites it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    has_moved: bool,
}

impl Piece {
    pub const WK: Self = Self::new(King, White);
    pub const WQ: Self = Self::new(Queen, White);
    pub const WR: Self = Self::new(Rook, White);
    pub const WB: Self = Self::new(Bishop, White);
    pub const WN: Self = Self::new(Knight, White);
    pub const WP: Self = Self::new(Pawn, White);

    pub const BK: Self = Self::new(King, Black);
    pub const BQ: Self = Self::new(Queen, Black);
    pub const BR: Self = Self::new(Rook, Black);
    pub const BB: Self = Self::new(Bishop, Black);
    pub const BN: Self = Self::new(Knight, Black);
    pub const BP: Self = Self::new(Pawn, Black);

    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn white(kind: PieceKind) -> Self {
        Self::new(kind, White)
    }

    #[inline]
    pub const fn black(kind: PieceKind) -> Self {
        Self::new(kind, Black)
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub fn set_moved(&mut self) {
        self.has_moved = true;
    }

    /// Same piece, marked as having moved.
    #[inline]
    pub fn moved(mut self) -> Self {
        self.set_moved();
        self
    }

    /// Board symbol: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            White => c,
            Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row step taken by this color's pawns: White moves up the board
    /// towards row 0, Black down towards row 7.
    pub const fn forward(&self) -> isize {
        match self {
            White => -1,
            Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

impl PieceKind {
    pub fn to_char(&self) -> char {
        match *self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
}

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

use strum::IntoEnumIterator;
use tracing::trace;

use super::material::Color;
use super::moves::{is_legal_geometry, Move};
use super::square::{Mask, Square};
use super::Board;

/// Whether `color`'s king is attacked by any opposing piece.
///
/// A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    attackers(board, king, !color).next().is_some()
}

/// Squares of `color`'s pieces that could move onto `target`.
pub fn attackers(board: &Board, target: Square, color: Color) -> impl Iterator<Item = Square> + '_ {
    board
        .pieces_of(color)
        .filter(move |&(from, piece)| is_legal_geometry(from, target, board, piece))
        .map(|(from, _)| from)
}

/// Plays `mv` on a copy of `board` and reports whether `color`'s king is
/// in check afterwards. `board` itself is left alone.
pub fn leaves_in_check(board: &Board, mv: Move, color: Color) -> bool {
    let mut trial = board.clone();
    trial.apply_move(mv.from, mv.to);
    is_in_check(&trial, color)
}

/// Every move available to `color`: geometrically legal and not leaving
/// its own king in check.
pub fn legal_moves(board: &Board, color: Color) -> impl Iterator<Item = Move> + '_ {
    board.pieces_of(color).flat_map(move |(from, piece)| {
        Square::iter()
            .filter(move |&to| is_legal_geometry(from, to, board, piece))
            .map(move |to| Move::new(from, to))
            .filter(move |&mv| !leaves_in_check(board, mv, color))
    })
}

/// Legal destinations for the piece on `from`, whichever color it is.
pub fn legal_destinations(board: &Board, from: Square) -> Mask {
    let Some(piece) = board[from] else {
        return Mask::empty();
    };
    let color = piece.color();
    Mask::from_squares(
        Square::iter()
            .filter(|&to| is_legal_geometry(from, to, board, piece))
            .filter(|&to| !leaves_in_check(board, Move::new(from, to), color)),
    )
}

/// Whether `color` is checkmated: in check, with no move that gets out of
/// it. A side that is not in check is never mated, even with no moves left.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_in_check(board, color) {
        return false;
    }
    match legal_moves(board, color).next() {
        Some(escape) => {
            trace!(%color, %escape, "check can be escaped");
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;
    use Color::*;
    use Square::*;

    #[test]
    fn test_initial_board_not_in_check() {
        let board = Board::initial();
        assert!(!is_in_check(&board, White));
        assert!(!is_in_check(&board, Black));
        assert!(!is_checkmate(&board, White));
        assert!(!is_checkmate(&board, Black));
    }
    #[test]
    fn test_rook_checks_along_open_file() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E8, Some(Piece::BR));
        assert!(is_in_check(&board, White));
        let attackers: Vec<Square> = attackers(&board, E1, Black).collect();
        assert_eq!(attackers, vec![E8]);
    }
    #[test]
    fn test_blocked_rook_does_not_check() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E4, Some(Piece::WN))
            .set_contents(E8, Some(Piece::BR));
        assert!(!is_in_check(&board, White));
    }
    #[test]
    fn test_pawn_checks_diagonally_only() {
        let board = Board::empty()
            .set_contents(E4, Some(Piece::WK))
            .set_contents(E5, Some(Piece::BP));
        assert!(!is_in_check(&board, White));
        let board = Board::empty()
            .set_contents(E4, Some(Piece::WK))
            .set_contents(D5, Some(Piece::BP));
        assert!(is_in_check(&board, White));
        // black pawns only capture downwards
        let board = Board::empty()
            .set_contents(E4, Some(Piece::WK))
            .set_contents(D3, Some(Piece::BP));
        assert!(!is_in_check(&board, White));
    }
    #[test]
    fn test_knight_check() {
        let board = Board::empty()
            .set_contents(E8, Some(Piece::BK))
            .set_contents(F6, Some(Piece::WN));
        assert!(is_in_check(&board, Black));
        assert!(!is_in_check(&board, White));
    }
    #[test]
    fn test_missing_king_is_not_in_check() {
        let board = Board::empty().set_contents(E8, Some(Piece::BQ));
        assert!(!is_in_check(&board, White));
        assert!(!is_checkmate(&board, White));
    }
    #[test]
    fn test_leaves_in_check_pinned_rook() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E2, Some(Piece::WR))
            .set_contents(E8, Some(Piece::BR));
        let before = board.clone();
        assert!(leaves_in_check(&board, Move::new(E2, D2), White));
        assert!(!leaves_in_check(&board, Move::new(E2, E5), White));
        assert!(!leaves_in_check(&board, Move::new(E2, E8), White));
        assert_eq!(board, before);
    }
    #[test]
    fn test_initial_legal_moves() {
        let board = Board::initial();
        assert_eq!(legal_moves(&board, White).count(), 20);
        assert_eq!(legal_moves(&board, Black).count(), 20);
    }
    #[test]
    fn test_legal_destinations_respect_pin() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E2, Some(Piece::WR))
            .set_contents(E8, Some(Piece::BR));
        let destinations = legal_destinations(&board, E2);
        assert_eq!(destinations.len(), 6);
        assert!(destinations.contains(E8));
        assert!(!destinations.contains(D2));
        assert!(legal_destinations(&board, E4).is_empty());
    }
    #[test]
    fn test_legal_destinations_match_legal_moves() {
        let game = Game::replay(["e2 e4", "f7 f6", "d1 h5"]).unwrap();
        let board = game.board();
        for (from, piece) in board.pieces() {
            let expected = legal_moves(board, piece.color())
                .filter(|mv| mv.from == from)
                .map(|mv| mv.to);
            assert_eq!(legal_destinations(board, from), Mask::from_squares(expected));
        }
        // only g7 g6 gets Black out of check
        let g_pawn = legal_destinations(board, G7);
        assert_eq!(g_pawn.iter().collect::<Vec<_>>(), vec![G6]);
        assert!(legal_destinations(board, A7).is_empty());
    }
    #[test]
    fn test_back_rank_mate() {
        let board = Board::empty()
            .set_contents(G8, Some(Piece::BK))
            .set_contents(F7, Some(Piece::BP))
            .set_contents(G7, Some(Piece::BP))
            .set_contents(H7, Some(Piece::BP))
            .set_contents(A8, Some(Piece::WR))
            .set_contents(E1, Some(Piece::WK));
        assert!(is_in_check(&board, Black));
        assert!(is_checkmate(&board, Black));
    }
    #[test]
    fn test_check_escaped_by_capture() {
        let board = Board::empty()
            .set_contents(G8, Some(Piece::BK))
            .set_contents(F7, Some(Piece::BP))
            .set_contents(G7, Some(Piece::BP))
            .set_contents(H7, Some(Piece::BP))
            .set_contents(D5, Some(Piece::BQ))
            .set_contents(A8, Some(Piece::WR))
            .set_contents(E1, Some(Piece::WK));
        assert!(is_in_check(&board, Black));
        assert!(!is_checkmate(&board, Black));
    }
    #[test]
    fn test_check_escaped_by_block() {
        let board = Board::empty()
            .set_contents(G8, Some(Piece::BK))
            .set_contents(F7, Some(Piece::BP))
            .set_contents(G7, Some(Piece::BP))
            .set_contents(H7, Some(Piece::BP))
            .set_contents(C6, Some(Piece::BN))
            .set_contents(A8, Some(Piece::WR))
            .set_contents(E1, Some(Piece::WK));
        assert!(!is_checkmate(&board, Black));
        let escapes: Vec<Move> = legal_moves(&board, Black).collect();
        assert!(escapes.contains(&Move::new(C6, B8)));
        assert!(escapes.contains(&Move::new(C6, D8)));
    }
    #[test]
    fn test_stalemate_is_not_checkmate() {
        let board = Board::empty()
            .set_contents(H8, Some(Piece::BK))
            .set_contents(F7, Some(Piece::WQ))
            .set_contents(G6, Some(Piece::WK));
        assert!(!is_in_check(&board, Black));
        assert_eq!(legal_moves(&board, Black).count(), 0);
        assert!(!is_checkmate(&board, Black));
    }

    fn any_square() -> impl Strategy<Value = Square> {
        (0usize..64).prop_map(Square::from_index)
    }

    proptest! {
        #[test]
        fn test_check_detection_does_not_mutate(square in any_square(), white in any::<bool>()) {
            let mut board = Board::initial();
            board.apply_move(E2, E4);
            board.remove(square);
            let before = board.clone();
            let color = if white { White } else { Black };
            let _ = is_in_check(&board, color);
            let _ = is_checkmate(&board, color);
            prop_assert_eq!(board, before);
        }
    }
}

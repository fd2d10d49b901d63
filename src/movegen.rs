/* =======================================================================
Rustic is a chess playing engine.
Copyright (C) 2019-2024, Marcel Vanthoor
https://rustic-chess.org/

Rustic is written in the Rust programming language. It is an original
work, not derived from any engine that came before it. However, it does
use a lot of concepts which are well-known and are in use by most if not
all classical alpha/beta-based chess engines.

Rustic is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Rustic is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

pub mod defs;

use crate::board::Board;
use crate::defs::{BoardPos, DIAGONAL_DIRECTIONS, KNIGHT_JUMPS, ORTHOGONAL_DIRECTIONS, Piece, PieceType, RAY_DIRECTIONS, Side};
use crate::rules::is_move_legal;
use defs::{Move, MoveList};

/// Every legal move for `side`, in the order described for move ordering:
/// the transposition-table PV move first (if legal), then every capture,
/// then every remaining move. Within the capture/quiet buckets, order
/// follows iteration through `side`'s piece list and then each piece's own
/// directional table — deterministic given identical input, never
/// re-sorted by any heuristic score.
pub fn ordered_legal_moves(board: &Board, side: Side, pv_move: Option<Move>) -> MoveList {
    let mut result = MoveList::new();

    let pv = pv_move.filter(|m| !m.is_none() && board.us() == side && is_move_legal(board, *m));
    if let Some(pv) = pv {
        result.push(pv);
    }

    let mut captures = MoveList::new();
    let mut quiets = MoveList::new();

    for from in board.occupied_squares(side) {
        let piece = board.piece_at(from);
        for to in candidate_destinations(board, from, piece) {
            let mv = Move::new(from, to);
            if Some(mv) == pv {
                continue;
            }
            if !is_move_legal(board, mv) {
                continue;
            }
            if is_capture_move(board, piece, mv) {
                captures.push(mv);
            } else {
                quiets.push(mv);
            }
        }
    }

    for mv in captures.iter() {
        result.push(*mv);
    }
    for mv in quiets.iter() {
        result.push(*mv);
    }

    result
}

fn is_capture_move(board: &Board, piece: Piece, mv: Move) -> bool {
    if piece.piece_type == PieceType::Pawn && mv.from.file != mv.to.file {
        true
    } else {
        !board.piece_at(mv.to).is_empty()
    }
}

// Pseudo-destinations reachable by this piece's shape, stopping sliders at
// the first occupied square in each direction (inclusive, so a capture on
// that square is still offered as a candidate). Final legality — whose
// piece is there, check status, castling rights, en-passant target — is
// left entirely to `is_move_legal`.
fn candidate_destinations(board: &Board, from: BoardPos, piece: Piece) -> Vec<BoardPos> {
    match piece.piece_type {
        PieceType::King => {
            let mut out: Vec<BoardPos> = RAY_DIRECTIONS
                .iter()
                .map(|&(df, dr)| from.offset(df, dr))
                .filter(|sq| !sq.is_none())
                .collect();
            out.push(from.offset(2, 0));
            out.push(from.offset(-2, 0));
            out.retain(|sq| !sq.is_none());
            out
        }
        PieceType::Queen => slide(board, from, &RAY_DIRECTIONS),
        PieceType::Rook => slide(board, from, &ORTHOGONAL_DIRECTIONS),
        PieceType::Bishop => slide(board, from, &DIAGONAL_DIRECTIONS),
        PieceType::Knight => KNIGHT_JUMPS
            .iter()
            .map(|&(df, dr)| from.offset(df, dr))
            .filter(|sq| !sq.is_none())
            .collect(),
        PieceType::Pawn => {
            let dir = piece.owner.pawn_direction();
            let mut out = vec![from.offset(0, dir), from.offset(0, 2 * dir)];
            out.push(from.offset(1, dir));
            out.push(from.offset(-1, dir));
            out.retain(|sq| !sq.is_none());
            out
        }
        PieceType::Empty => Vec::new(),
    }
}

fn slide(board: &Board, from: BoardPos, directions: &[(i8, i8)]) -> Vec<BoardPos> {
    let mut out = Vec::new();
    for &(df, dr) in directions {
        let mut sq = from.offset(df, dr);
        while !sq.is_none() {
            out.push(sq);
            if !board.piece_at(sq).is_empty() {
                break;
            }
            sq = sq.offset(df, dr);
        }
    }
    out
}

/// `in_check[side] ∧` no legal move exists for `side`.
pub fn checkmated(board: &Board, side: Side) -> bool {
    board.in_check[side.as_index()] && ordered_legal_moves(board, side, None).is_empty()
}

/// No legal move for the side to move, and that side is not in check.
pub fn stalemate(board: &Board) -> bool {
    let side = board.us();
    !board.in_check[side.as_index()] && ordered_legal_moves(board, side, None).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let board = Board::new_game();
        let moves = ordered_legal_moves(&board, Side::White, None);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new_game();
        board.apply_move(Move::new(BoardPos::new(5, 1), BoardPos::new(5, 2)), true); // f2-f3
        board.apply_move(Move::new(BoardPos::new(4, 6), BoardPos::new(4, 4)), true); // e7-e5
        board.apply_move(Move::new(BoardPos::new(6, 1), BoardPos::new(6, 3)), true); // g2-g4
        board.apply_move(Move::new(BoardPos::new(3, 7), BoardPos::new(7, 3)), true); // d8-h4

        assert!(checkmated(&board, Side::White));
        assert!(!stalemate(&board));
    }

    #[test]
    fn pv_move_is_listed_first_and_not_duplicated() {
        let board = Board::new_game();
        let pv = Move::new(BoardPos::new(4, 1), BoardPos::new(4, 3));
        let moves = ordered_legal_moves(&board, Side::White, Some(pv));
        assert_eq!(moves.get_move(0), pv);
        assert_eq!(moves.iter().filter(|m| **m == pv).count(), 1);
    }

    #[test]
    fn captures_are_ordered_before_quiet_moves() {
        // White pawn can capture a black knight sitting one diagonal step
        // away; the capture must appear before any quiet king move.
        let mut board = Board::empty();
        board.put_piece(Side::White, PieceType::King, BoardPos::new(0, 0));
        board.put_piece(Side::Black, PieceType::King, BoardPos::new(7, 7));
        board.put_piece(Side::White, PieceType::Pawn, BoardPos::new(3, 3));
        board.put_piece(Side::Black, PieceType::Knight, BoardPos::new(4, 4));

        let moves = ordered_legal_moves(&board, Side::White, None);
        let capture_idx = moves
            .iter()
            .position(|m| m.to == BoardPos::new(4, 4))
            .expect("capture should be generated");
        let king_idx = moves
            .iter()
            .position(|m| board.piece_at(m.from).piece_type == PieceType::King)
            .expect("king move should be generated");
        assert!(capture_idx < king_idx);
    }
}

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

//! Attack detection and move legality. Four pure predicates plus the
//! `Board::apply_move` mutator (the mutator lives on `Board` itself, in
//! `board::playmove`, since it owns the incremental state it updates).

use crate::board::Board;
use crate::defs::{BoardPos, CastleSide, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS, PieceType, Side};
use crate::movegen::defs::Move;

/// True iff any piece owned by `attacker` could move onto `sq`, ignoring
/// pins and whose-turn-it-is. Used both for check detection and for
/// "would this square be attacked after the king moves there".
pub fn is_attacked(board: &Board, sq: BoardPos, attacker: Side) -> bool {
    if sq.is_none() {
        return false;
    }

    for &(df, dr) in ORTHOGONAL_DIRECTIONS.iter() {
        if ray_hits(board, sq, (df, dr), attacker, false) {
            return true;
        }
    }
    for &(df, dr) in DIAGONAL_DIRECTIONS.iter() {
        if ray_hits(board, sq, (df, dr), attacker, true) {
            return true;
        }
    }
    for &(df, dr) in crate::defs::KNIGHT_JUMPS.iter() {
        let candidate = sq.offset(df, dr);
        if candidate.is_none() {
            continue;
        }
        let piece = board.piece_at(candidate);
        if piece.owner == attacker && piece.piece_type == PieceType::Knight {
            return true;
        }
    }
    false
}

// Walks one ray outward from `sq` until the first occupied square (or the
// edge of the board), and decides whether that square is an attacker.
fn ray_hits(board: &Board, sq: BoardPos, dir: (i8, i8), attacker: Side, diagonal: bool) -> bool {
    let mut distance = 0;
    let mut current = sq;
    loop {
        current = current.offset(dir.0, dir.1);
        if current.is_none() {
            return false;
        }
        distance += 1;
        let piece = board.piece_at(current);
        if piece.is_empty() {
            continue;
        }
        if piece.owner != attacker {
            return false;
        }
        return if diagonal {
            match piece.piece_type {
                PieceType::Queen | PieceType::Bishop => true,
                PieceType::King => distance == 1,
                // A pawn attacks diagonally forward from its own (the
                // attacker's) point of view, not the defender's.
                PieceType::Pawn => distance == 1 && dir.1 == -attacker.pawn_direction(),
                _ => false,
            }
        } else {
            match piece.piece_type {
                PieceType::Queen | PieceType::Rook => true,
                PieceType::King => distance == 1,
                _ => false,
            }
        };
    }
}

/// Shape feasibility of `mv` for whichever piece sits on `mv.from`,
/// independent of whose turn it is or whether the mover ends up in check.
pub fn is_move_shape_possible(board: &Board, mv: Move) -> bool {
    let piece = board.piece_at(mv.from);
    if piece.is_empty() || mv.to.is_none() || mv.from == mv.to {
        return false;
    }

    let df = mv.to.file - mv.from.file;
    let dr = mv.to.rank - mv.from.rank;

    match piece.piece_type {
        PieceType::King => {
            if df.abs() <= 1 && dr.abs() <= 1 {
                true
            } else if dr == 0 && df.abs() == 2 {
                castle_shape_possible(board, piece.owner, mv)
            } else {
                false
            }
        }
        PieceType::Queen => (df == 0 || dr == 0 || df.abs() == dr.abs()) && path_clear(board, mv.from, mv.to),
        PieceType::Rook => (df == 0 || dr == 0) && path_clear(board, mv.from, mv.to),
        PieceType::Bishop => df.abs() == dr.abs() && path_clear(board, mv.from, mv.to),
        PieceType::Knight => crate::defs::KNIGHT_JUMPS.contains(&(df, dr)),
        PieceType::Pawn => pawn_shape_possible(board, piece.owner, mv, df, dr),
        PieceType::Empty => false,
    }
}

fn pawn_shape_possible(board: &Board, owner: Side, mv: Move, df: i8, dr: i8) -> bool {
    let dir = owner.pawn_direction();
    let dest = board.piece_at(mv.to);

    if df == 0 {
        if dr == dir {
            return dest.is_empty();
        }
        if dr == 2 * dir {
            let start_rank = owner.home_rank() + dir;
            if mv.from.rank != start_rank {
                return false;
            }
            let intermediate = mv.from.offset(0, dir);
            return board.piece_at(intermediate).is_empty() && dest.is_empty();
        }
        false
    } else if df.abs() == 1 && dr == dir {
        // Either an ordinary capture or (if the destination is empty) a
        // candidate en-passant capture; `is_move_legal` validates which.
        if dest.is_empty() {
            true
        } else {
            dest.owner != owner
        }
    } else {
        false
    }
}

fn castle_shape_possible(board: &Board, owner: Side, mv: Move) -> bool {
    let home_rank = owner.home_rank();
    if mv.from.rank != home_rank || mv.from.file != 4 {
        return false;
    }

    let kingside = mv.to.file > mv.from.file;
    let rook_file = if kingside { 7 } else { 0 };

    let (lo, hi) = if rook_file < mv.from.file {
        (rook_file + 1, mv.from.file - 1)
    } else {
        (mv.from.file + 1, rook_file - 1)
    };
    for file in lo..=hi {
        if !board.piece_at(BoardPos::new(file, home_rank)).is_empty() {
            return false;
        }
    }

    let step = if kingside { 1 } else { -1 };
    let mut sq = mv.from;
    loop {
        if is_attacked(board, sq, owner.opponent()) {
            return false;
        }
        if sq == mv.to {
            break;
        }
        sq = sq.offset(step, 0);
    }
    true
}

fn path_clear(board: &Board, from: BoardPos, to: BoardPos) -> bool {
    let df = (to.file - from.file).signum();
    let dr = (to.rank - from.rank).signum();
    let mut sq = from.offset(df, dr);
    while sq != to {
        if sq.is_none() {
            return false;
        }
        if !board.piece_at(sq).is_empty() {
            return false;
        }
        sq = sq.offset(df, dr);
    }
    true
}

/// Full legality: shape, ownership/turn, destination rules, en-passant and
/// castling preconditions, and (by far the most expensive check) that the
/// mover's own king is not left in check.
pub fn is_move_legal(board: &Board, mv: Move) -> bool {
    if !is_move_shape_possible(board, mv) {
        return false;
    }

    let piece = board.piece_at(mv.from);
    if piece.owner != board.us() {
        return false;
    }

    let dest = board.piece_at(mv.to);
    if !dest.is_empty() {
        if dest.owner == piece.owner {
            return false;
        }
        if dest.piece_type == PieceType::King {
            return false;
        }
    }

    let df = mv.to.file - mv.from.file;
    let dr = mv.to.rank - mv.from.rank;

    if piece.piece_type == PieceType::Pawn && df.abs() == 1 && dest.is_empty() {
        let target_file = board.state.enpassant_target[piece.owner.as_index()];
        if target_file != mv.to.file {
            return false;
        }
        let capture_rank = if piece.owner == Side::White { 4 } else { 3 };
        if mv.from.rank != capture_rank {
            return false;
        }
    }

    if piece.piece_type == PieceType::King && dr == 0 && df.abs() == 2 {
        let side = if df > 0 { CastleSide::Kingside } else { CastleSide::Queenside };
        if !board.has_castle_right(piece.owner, side) {
            return false;
        }
    }

    let mut clone = board.clone_for_search();
    clone.apply_move(mv, false);
    !clone.in_check[piece.owner.as_index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::PieceType as PT;

    #[test]
    fn is_attacked_is_symmetric_for_opposing_pawns() {
        // Two pawns facing off diagonally: each should see the other as
        // an attacker of its own square, derived from the attacker's own
        // forward direction (S3).
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::Pawn, BoardPos::new(3, 3));
        board.put_piece(Side::Black, PT::Pawn, BoardPos::new(4, 4));
        board.put_piece(Side::White, PT::King, BoardPos::new(0, 0));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        assert!(is_attacked(&board, BoardPos::new(4, 4), Side::White));
        assert!(is_attacked(&board, BoardPos::new(3, 3), Side::Black));
    }

    #[test]
    fn knight_attacks_l_shape_only() {
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::Knight, BoardPos::new(1, 0));
        board.put_piece(Side::White, PT::King, BoardPos::new(0, 0));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        assert!(is_attacked(&board, BoardPos::new(3, 1), Side::White));
        assert!(!is_attacked(&board, BoardPos::new(1, 2), Side::White));
    }

    #[test]
    fn rook_blocked_by_intervening_piece() {
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::Rook, BoardPos::new(0, 0));
        board.put_piece(Side::White, PT::Pawn, BoardPos::new(0, 3));
        board.put_piece(Side::White, PT::King, BoardPos::new(4, 0));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        assert!(!is_attacked(&board, BoardPos::new(0, 5), Side::White));
        assert!(is_attacked(&board, BoardPos::new(0, 2), Side::White));
    }

    #[test]
    fn starting_position_knight_move_is_legal() {
        let board = Board::new_game();
        let mv = Move::new(BoardPos::new(1, 0), BoardPos::new(2, 2));
        assert!(is_move_legal(&board, mv));
    }

    #[test]
    fn king_attacks_only_adjacent_squares() {
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::King, BoardPos::new(4, 4));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        assert!(is_attacked(&board, BoardPos::new(4, 5), Side::White));
        assert!(is_attacked(&board, BoardPos::new(5, 5), Side::White));
        assert!(!is_attacked(&board, BoardPos::new(4, 6), Side::White));
    }

    #[test]
    fn castle_queenside_ignores_attack_on_b_file() {
        // b1 is attacked but isn't one of the squares the king actually
        // passes through (e1, d1, c1), so the castling exception must let
        // this through even though the square is contested.
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::King, BoardPos::new(4, 0));
        board.put_piece(Side::White, PT::Rook, BoardPos::new(0, 0));
        board.put_piece(Side::Black, PT::Rook, BoardPos::new(1, 7));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        assert!(is_attacked(&board, BoardPos::new(1, 0), Side::Black));

        let mv = Move::new(BoardPos::new(4, 0), BoardPos::new(2, 0));
        assert!(castle_shape_possible(&board, Side::White, mv));
    }

    #[test]
    fn pinned_king_cannot_move_into_check() {
        // White king on e1, black rook on e8: e-file move into the ray is
        // illegal, sideways off the ray is legal.
        let mut board = Board::empty();
        board.put_piece(Side::White, PT::King, BoardPos::new(4, 0));
        board.put_piece(Side::Black, PT::Rook, BoardPos::new(4, 7));
        board.put_piece(Side::Black, PT::King, BoardPos::new(7, 7));

        let into_check = Move::new(BoardPos::new(4, 0), BoardPos::new(4, 1));
        let sideways = Move::new(BoardPos::new(4, 0), BoardPos::new(3, 0));
        assert!(!is_move_legal(&board, into_check));
        assert!(is_move_legal(&board, sideways));
    }
}

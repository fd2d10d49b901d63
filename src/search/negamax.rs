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

use super::defs::{ALPHA_INIT, BETA_INIT, CHECKMATE_OPPONENT, CHECKMATE_SELF, STALEMATE_VALUE, TIME_UP};
use super::time::{should_poll_clock, Deadline};
use crate::defs::Side;
use crate::engine::transposition::{BoundKind, Tt, TranspositionEntry};
use crate::evaluation::position_value;
use crate::movegen::defs::{Move, MoveList};
use crate::movegen::ordered_legal_moves;

/// Negamax-with-alpha-beta, called once per child of the root for a fixed
/// target `depth`. Reads and writes the shared transposition table like
/// every other worker; nothing here is synchronised beyond what `Tt`
/// itself provides, per the Lazy-SMP model (workers only talk to each
/// other through the table).
pub fn negamax(state: &crate::board::Board, mut alpha: i32, mut beta: i32, depth: i8, deadline: &Deadline, tt: &Tt) -> i32 {
    if should_poll_clock(depth) && deadline.is_expired() {
        return TIME_UP;
    }

    let alpha0 = alpha;
    let side = state.us();
    let hash = state.hash();

    let entry = tt.get(hash);
    if entry.depth != 0 && entry.depth as i8 >= depth {
        match entry.bound_kind {
            BoundKind::Exact => return entry.value,
            BoundKind::Lower => alpha = alpha.max(entry.value),
            BoundKind::Upper => beta = beta.min(entry.value),
        }
        if alpha >= beta {
            return entry.value;
        }
    }

    let pv_move = entry.has_usable_move().then_some(entry.best_move);
    let moves = ordered_legal_moves(state, side, pv_move);

    if moves.is_empty() {
        return if state.in_check[side.as_index()] {
            CHECKMATE_SELF
        } else {
            STALEMATE_VALUE
        };
    }
    // A position where the side to move still has moves but the opponent
    // is somehow already checkmated cannot be reached through legal play
    // (the game would already be over), so unlike the root enumeration
    // above there is no separate "opponent checkmated" branch here.
    let _ = CHECKMATE_OPPONENT;

    if depth == 0 {
        let sign = if side == Side::White { 1 } else { -1 };
        return position_value(state) * sign;
    }

    let mut best_value = ALPHA_INIT;
    let mut best_move = Move::NONE;

    for mv in moves.iter() {
        let mut clone = state.clone_for_search();
        clone.apply_move(*mv, true);
        let raw = negamax(&clone, -beta, -alpha, depth - 1, deadline, tt);
        if raw == TIME_UP {
            return TIME_UP;
        }
        let value = -raw;
        if value > best_value {
            best_value = value;
            best_move = *mv;
        }
        if value > alpha {
            alpha = value;
        }
        if alpha >= beta {
            break;
        }
    }

    let bound_kind = if best_value <= alpha0 {
        BoundKind::Upper
    } else if best_value >= beta {
        BoundKind::Lower
    } else {
        BoundKind::Exact
    };

    tt.put(TranspositionEntry {
        hash,
        best_move,
        depth,
        value: best_value,
        bound_kind,
    });

    best_value
}

/// Runs one full iteration at `depth` from the (shared, read-only) root
/// position and the root's precomputed move list. Writes the result to
/// the table and returns the move it found, or `None` if the deadline hit
/// before a single move finished.
pub fn negamax_root(state: &crate::board::Board, root_moves: &MoveList, depth: i8, deadline: &Deadline, tt: &Tt) -> Option<Move> {
    let alpha0 = ALPHA_INIT;
    let mut alpha = alpha0;
    let beta = BETA_INIT;

    let mut best_move: Option<Move> = None;
    let mut best_value = ALPHA_INIT;

    for mv in root_moves.iter() {
        let mut clone = state.clone_for_search();
        clone.apply_move(*mv, true);
        let raw = negamax(&clone, -beta, -alpha, depth - 1, deadline, tt);
        if raw == TIME_UP {
            return None;
        }
        let value = -raw;
        if value > best_value {
            best_value = value;
            best_move = Some(*mv);
        }
        if value > alpha {
            alpha = value;
        }
        if alpha >= beta {
            break;
        }
    }

    if let Some(mv) = best_move {
        tt.put(TranspositionEntry {
            hash: state.hash(),
            best_move: mv,
            depth,
            value: best_value,
            bound_kind: BoundKind::Exact,
        });
    }

    best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn depth_one_prefers_a_free_capture() {
        let mut board = Board::empty();
        board.put_piece(Side::White, crate::defs::PieceType::King, crate::defs::BoardPos::new(0, 0));
        board.put_piece(Side::Black, crate::defs::PieceType::King, crate::defs::BoardPos::new(7, 7));
        board.put_piece(Side::White, crate::defs::PieceType::Rook, crate::defs::BoardPos::new(0, 3));
        board.put_piece(Side::Black, crate::defs::PieceType::Knight, crate::defs::BoardPos::new(0, 6));

        let tt = Tt::new(1024);
        let moves = ordered_legal_moves(&board, Side::White, None);
        let deadline = super::super::time::Deadline::in_ms(5_000);
        let best = negamax_root(&board, &moves, 2, &deadline, &tt).expect("a move should be found");
        assert_eq!(best.to, crate::defs::BoardPos::new(0, 6));
    }

    #[test]
    fn search_is_deterministic_on_repeated_calls() {
        let board = Board::new_game();
        let deadline = super::super::time::Deadline::in_ms(5_000);

        let tt1 = Tt::new(1 << 16);
        let moves1 = ordered_legal_moves(&board, Side::White, None);
        let first = negamax_root(&board, &moves1, 3, &deadline, &tt1);

        let tt2 = Tt::new(1 << 16);
        let moves2 = ordered_legal_moves(&board, Side::White, None);
        let second = negamax_root(&board, &moves2, 3, &deadline, &tt2);

        assert_eq!(first, second);
    }
}

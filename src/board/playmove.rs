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

use super::{zobrist, Board};
use crate::defs::{CastleSide, PieceType};
use crate::movegen::defs::Move;

impl Board {
    // Destructive move application. The caller must have already verified
    // `is_move_legal` for this move against the pre-move state; this
    // function does not re-check legality.
    //
    // `recompute_hash = false` is for search nodes that are about to be
    // discarded immediately (e.g. a losing branch cut by alpha-beta) where
    // the hash of the resulting position is never read; skipping the
    // recompute saves a full board scan on every node.
    pub fn apply_move(&mut self, mv: Move, recompute_hash: bool) {
        let owner = self.us();
        let opponent = self.opponent();
        let moving_piece = self.piece_at(mv.from);
        let captured_piece = self.piece_at(mv.to);

        let is_pawn = moving_piece.piece_type == PieceType::Pawn;
        let is_double_push = is_pawn && (mv.to.rank - mv.from.rank).abs() == 2;
        let is_diagonal = is_pawn && mv.from.file != mv.to.file;
        let is_en_passant_capture = is_diagonal && captured_piece.is_empty();

        // Step 1: en passant bookkeeping.
        self.clear_ep_target(owner);
        if is_double_push {
            self.set_ep_target(opponent, mv.to.file);
        }
        if is_en_passant_capture {
            let captured_sq = mv.to.offset(0, -owner.pawn_direction());
            self.remove_piece(opponent, captured_sq);
        } else if !captured_piece.is_empty() {
            self.remove_piece(opponent, mv.to);
        }

        // Step 2: castling-rights invalidation.
        if moving_piece.piece_type == PieceType::King {
            self.set_castle_right(owner, CastleSide::Queenside, false);
            self.set_castle_right(owner, CastleSide::Kingside, false);
        }
        if moving_piece.piece_type == PieceType::Rook {
            invalidate_rook_right(self, owner, mv.from);
        }
        if captured_piece.piece_type == PieceType::Rook {
            invalidate_rook_right(self, opponent, mv.to);
        }

        // Step 3: castling rook hop.
        let is_castle = moving_piece.piece_type == PieceType::King && (mv.to.file - mv.from.file).abs() == 2;
        if is_castle {
            let home_rank = owner.home_rank();
            let (rook_from_file, rook_to_file) = if mv.to.file > mv.from.file {
                (7, 5)
            } else {
                (0, 3)
            };
            let rook_from = crate::defs::BoardPos::new(rook_from_file, home_rank);
            let rook_to = crate::defs::BoardPos::new(rook_to_file, home_rank);
            self.relocate_piece(owner, rook_from, rook_to);
        }

        // Steps 4-6: piece-list update, promotion, board write. All three
        // fall out of remove/put on the mailbox representation.
        self.remove_piece(owner, mv.from);
        let final_piece_type = if is_pawn && mv.to.rank == owner.promotion_rank() {
            PieceType::Queen
        } else {
            moving_piece.piece_type
        };
        self.put_piece(owner, final_piece_type, mv.to);

        // Step 7: check recomputation.
        self.recompute_in_check();

        // Step 8: side toggle and ply count.
        self.swap_side();
        self.bump_ply();

        // Step 9: hash.
        if recompute_hash {
            self.state.hash = zobrist::zobrist(self);
        } else {
            self.state.hash = 0;
        }
    }
}

fn invalidate_rook_right(board: &mut Board, owner: crate::defs::Side, square: crate::defs::BoardPos) {
    if square.rank != owner.home_rank() {
        return;
    }
    if square.file == 0 {
        board.set_castle_right(owner, CastleSide::Queenside, false);
    } else if square.file == 7 {
        board.set_castle_right(owner, CastleSide::Kingside, false);
    }
}

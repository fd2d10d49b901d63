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

use super::Board;
use crate::defs::{BoardPos, CastleSide, FEN_START_POSITION, PieceType, Side};
use thiserror::Error;

const FIELD_PIECE_PLACEMENT: usize = 0;
const FIELD_SIDE_TO_MOVE: usize = 1;
const FIELD_CASTLING: usize = 2;
const FIELD_EN_PASSANT: usize = 3;
const NR_OF_FEN_FIELDS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is missing one or both kings")]
    MissingKing,
    #[error("FEN piece placement field is malformed")]
    BadPlacement,
    #[error("FEN castling rights field is malformed")]
    BadCastling,
    #[error("FEN en-passant field is malformed")]
    BadEnPassant,
    #[error("FEN side-to-move field is malformed")]
    BadSideToMove,
}

impl Board {
    // Reads a FEN string into `self`, replacing whatever position was
    // there before. `None` defaults to the standard starting position.
    pub fn fen_read(&mut self, fen: Option<&str>) -> Result<(), FenError> {
        let fen_string = fen.unwrap_or(FEN_START_POSITION);
        let parts: Vec<&str> = fen_string.split_whitespace().collect();
        if parts.len() < NR_OF_FEN_FIELDS {
            return Err(FenError::BadPlacement);
        }

        let mut board = Board::empty();
        parse_piece_placement(&mut board, parts[FIELD_PIECE_PLACEMENT])?;
        parse_side_to_move(&mut board, parts[FIELD_SIDE_TO_MOVE])?;
        parse_castling(&mut board, parts[FIELD_CASTLING])?;
        parse_en_passant(&mut board, parts[FIELD_EN_PASSANT])?;
        // Halfmove/fullmove counters, if present, are parsed-and-discarded:
        // this crate does not track the fifty-move rule.

        if board.king_square(Side::White).is_none() || board.king_square(Side::Black).is_none() {
            return Err(FenError::MissingKing);
        }

        board.recompute_in_check();
        board.state.hash = super::zobrist::zobrist(&board);
        *self = board;
        Ok(())
    }

    pub fn fen_write(&self) -> String {
        let mut fields = Vec::with_capacity(6);
        fields.push(write_piece_placement(self));
        fields.push(write_side_to_move(self));
        fields.push(write_castling(self));
        fields.push(write_en_passant(self));
        fields.push("0".to_string());
        fields.push("0".to_string());
        fields.join(" ")
    }
}

/// Free-function form matching the engine's public surface: `from_fen`
/// returns a fresh board instead of mutating one in place.
pub fn from_fen(fen: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    board.fen_read(Some(fen))?;
    Ok(board)
}

pub fn to_fen(board: &Board) -> String {
    board.fen_write()
}

fn piece_char(piece_type: PieceType, owner: Side) -> char {
    let c = match piece_type {
        PieceType::King => 'k',
        PieceType::Queen => 'q',
        PieceType::Rook => 'r',
        PieceType::Bishop => 'b',
        PieceType::Knight => 'n',
        PieceType::Pawn => 'p',
        PieceType::Empty => ' ',
    };
    if owner == Side::White {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

fn char_to_piece(c: char) -> Option<(PieceType, Side)> {
    let owner = if c.is_ascii_uppercase() {
        Side::White
    } else {
        Side::Black
    };
    let piece_type = match c.to_ascii_lowercase() {
        'k' => PieceType::King,
        'q' => PieceType::Queen,
        'r' => PieceType::Rook,
        'b' => PieceType::Bishop,
        'n' => PieceType::Knight,
        'p' => PieceType::Pawn,
        _ => return None,
    };
    Some((piece_type, owner))
}

// The first token in the piece-placement field is the top row of the
// printed board; this implementation stores it at internal rank 7,
// descending to rank 0 for the last token, so that White's own back rank
// (internal rank 0, see `Side::home_rank`) prints last, matching the
// standard starting FEN string.
fn parse_piece_placement(board: &mut Board, field: &str) -> Result<(), FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadPlacement);
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx as i8;
        let mut file = 0i8;
        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                file += digit as i8;
            } else {
                let (piece_type, owner) = char_to_piece(c).ok_or(FenError::BadPlacement)?;
                if !(0..8).contains(&file) {
                    return Err(FenError::BadPlacement);
                }
                board.put_piece(owner, piece_type, BoardPos::new(file, rank));
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadPlacement);
        }
    }

    Ok(())
}

fn write_piece_placement(board: &Board) -> String {
    let mut out = String::new();
    for row_idx in 0..8 {
        let rank = 7 - row_idx;
        let mut empty_run = 0;
        for file in 0..8 {
            let piece = board.piece_at(BoardPos::new(file, rank));
            if piece.is_empty() {
                empty_run += 1;
            } else {
                if empty_run > 0 {
                    out.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                out.push(piece_char(piece.piece_type, piece.owner));
            }
        }
        if empty_run > 0 {
            out.push_str(&empty_run.to_string());
        }
        if row_idx != 7 {
            out.push('/');
        }
    }
    out
}

fn parse_side_to_move(board: &mut Board, field: &str) -> Result<(), FenError> {
    board.state.side_to_move = match field {
        "w" => Side::White,
        "b" => Side::Black,
        _ => return Err(FenError::BadSideToMove),
    };
    Ok(())
}

fn write_side_to_move(board: &Board) -> String {
    match board.state.side_to_move {
        Side::White => "w".to_string(),
        Side::Black => "b".to_string(),
    }
}

fn parse_castling(board: &mut Board, field: &str) -> Result<(), FenError> {
    for side in [Side::White, Side::Black] {
        board.state.castle_rights[side.as_index()] = [false, false];
    }
    if field == "-" {
        return Ok(());
    }
    for c in field.chars() {
        match c {
            'K' => board.state.castle_rights[Side::White.as_index()][CastleSide::Kingside as usize] = true,
            'Q' => board.state.castle_rights[Side::White.as_index()][CastleSide::Queenside as usize] = true,
            'k' => board.state.castle_rights[Side::Black.as_index()][CastleSide::Kingside as usize] = true,
            'q' => board.state.castle_rights[Side::Black.as_index()][CastleSide::Queenside as usize] = true,
            _ => return Err(FenError::BadCastling),
        }
    }
    Ok(())
}

fn write_castling(board: &Board) -> String {
    let mut out = String::new();
    if board.has_castle_right(Side::White, CastleSide::Kingside) {
        out.push('K');
    }
    if board.has_castle_right(Side::White, CastleSide::Queenside) {
        out.push('Q');
    }
    if board.has_castle_right(Side::Black, CastleSide::Kingside) {
        out.push('k');
    }
    if board.has_castle_right(Side::Black, CastleSide::Queenside) {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

fn parse_en_passant(board: &mut Board, field: &str) -> Result<(), FenError> {
    if field == "-" {
        return Ok(());
    }
    let mut chars = field.chars();
    let file_char = chars.next().ok_or(FenError::BadEnPassant)?;
    let rank_char = chars.next().ok_or(FenError::BadEnPassant)?;
    if chars.next().is_some() {
        return Err(FenError::BadEnPassant);
    }

    let file = (file_char as i32) - ('a' as i32);
    if !(0..8).contains(&file) {
        return Err(FenError::BadEnPassant);
    }

    // rank '3' is the target for a Black capture (White just double
    // pushed); rank '6' is the target for a White capture.
    let owner = match rank_char {
        '3' => Side::Black,
        '6' => Side::White,
        _ => return Err(FenError::BadEnPassant),
    };
    if owner != board.state.side_to_move {
        return Err(FenError::BadEnPassant);
    }

    board.set_ep_target(owner, file as i8);
    Ok(())
}

fn write_en_passant(board: &Board) -> String {
    let side = board.state.side_to_move;
    let file = board.state.enpassant_target[side.as_index()];
    if file < 0 {
        return "-".to_string();
    }
    let file_char = (b'a' + file as u8) as char;
    let rank_char = if side == Side::Black { '3' } else { '6' };
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let board = Board::new_game();
        assert_eq!(board.fen_write(), FEN_START_POSITION.replace(" 0 0", " 0 0"));
        assert_eq!(to_fen(&board), FEN_START_POSITION);
    }

    #[test]
    fn from_fen_rejects_missing_king() {
        let err = from_fen("8/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
        assert_eq!(err, FenError::MissingKing);
    }

    #[test]
    fn en_passant_round_trips() {
        let board = from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 0").unwrap();
        assert_eq!(board.state.enpassant_target[Side::White.as_index()], 3);
        assert_eq!(to_fen(&board), "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 0");
    }
}

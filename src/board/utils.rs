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
use crate::defs::BoardPos;
use std::fmt;

impl Board {
    // A worker thread always gets a plain clone: `apply_move` is
    // destructive with no undo stack, so there is nothing thread-unsafe
    // left in `Board` to special-case the way the reference engine's
    // `clone_for_search` (which also resets move-history buffers) does.
    pub fn clone_for_search(&self) -> Board {
        self.clone()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let rank = 7 - row;
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let piece = self.piece_at(BoardPos::new(file, rank));
                write!(f, "{} ", piece_glyph(piece))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "side to move: {:?}", self.state.side_to_move)
    }
}

fn piece_glyph(piece: crate::defs::Piece) -> char {
    use crate::defs::{PieceType, Side};
    let c = match piece.piece_type {
        PieceType::Empty => return '.',
        PieceType::King => 'k',
        PieceType::Queen => 'q',
        PieceType::Rook => 'r',
        PieceType::Bishop => 'b',
        PieceType::Knight => 'n',
        PieceType::Pawn => 'p',
    };
    if piece.owner == Side::White {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_does_not_panic() {
        let board = Board::new_game();
        let rendered = format!("{board}");
        assert!(rendered.contains("side to move"));
    }
}

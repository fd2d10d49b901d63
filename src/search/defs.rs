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

/// Sentinel returned by `negamax` when the wall-clock deadline has passed
/// mid-search. Scores use the full `i32` range (checkmate values alone
/// already exceed `i16`), so this is `i32::MIN` rather than the reference
/// engine's `i16`-sized `-INF`.
pub const TIME_UP: i32 = i32::MIN;

pub const ALPHA_INIT: i32 = i32::MIN + 1;
pub const BETA_INIT: i32 = i32::MAX;

pub const CHECKMATE_SELF: i32 = -1_000_000;
pub const CHECKMATE_OPPONENT: i32 = 1_000_000;
pub const STALEMATE_VALUE: i32 = 0;

/// How many iterative-deepening tasks the root enqueues: one per target
/// depth from 1 up to and including this.
pub const D_MAX: i8 = crate::defs::MAX_SEARCH_DEPTH;

/// Depth written to a transposition entry recorded from an opening-book
/// hit, so later probes never think a deeper real search is needed.
pub const BOOK_HIT_DEPTH: i8 = D_MAX;

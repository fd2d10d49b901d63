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
pub mod negamax;
pub mod time;

use crate::board::Board;
use crate::defs::OPENING_BOOK_PLY_LIMIT;
use crate::engine::book::Book;
use crate::engine::threadpool::{AtomicRefCount, ThreadPool};
use crate::engine::transposition::{BoundKind, Tt, TranspositionEntry};
use crate::movegen::defs::Move;
use crate::movegen::ordered_legal_moves;
use defs::{BOOK_HIT_DEPTH, D_MAX};
use std::sync::Arc;
use time::Deadline;

/// Starts a Lazy-SMP search for `state` and returns immediately; the
/// caller later reads the result with `best_move`. `tt.set_protected` is
/// called first so concurrent root-level probes never evict the entry
/// this search is about to populate.
pub fn begin_search(state: &Board, tt: Arc<Tt>, book: Option<Arc<Book>>, pool: &ThreadPool, deadline: Deadline) {
    tt.set_protected(state.hash());

    if state.state.ply_count <= OPENING_BOOK_PLY_LIMIT {
        if let Some(book) = &book {
            if let Some(mv) = book.find(state.hash()) {
                if crate::rules::is_move_legal(state, mv) {
                    tt.put(TranspositionEntry {
                        hash: state.hash(),
                        best_move: mv,
                        depth: BOOK_HIT_DEPTH,
                        value: 0,
                        bound_kind: BoundKind::Exact,
                    });
                    log::info!("opening book hit at ply {}", state.state.ply_count);
                    return;
                }
            }
        }
    }

    let root = Arc::new(state.clone_for_search());
    let root_moves = Arc::new(ordered_legal_moves(state, state.us(), None));
    let refcount = Arc::new(AtomicRefCount::new(D_MAX as usize));

    for depth in 1..=D_MAX {
        let root = Arc::clone(&root);
        let root_moves = Arc::clone(&root_moves);
        let tt = Arc::clone(&tt);
        let refcount = Arc::clone(&refcount);

        let task: Box<dyn FnOnce() + Send> = Box::new(move || {
            negamax::negamax_root(&root, &root_moves, depth, &deadline, &tt);
            if refcount.dec() {
                log::debug!("search for hash {:#x} complete", root.hash());
            }
        });

        // The queue has room for every target depth up to MAX_SEARCH_DEPTH
        // at once; if it is ever full the caller just runs the task
        // inline rather than blocking the driver.
        if !pool.try_submit(task) {
            log::warn!("search queue full at depth {depth}; running inline");
            negamax::negamax_root(&root, &root_moves, depth, &deadline, &tt);
            refcount.dec();
        }
    }
}

/// Reads whatever move is currently recorded at the root hash, if any.
pub fn best_move(tt: &Tt, hash: u64) -> Option<Move> {
    let entry = tt.get(hash);
    entry.has_usable_move().then_some(entry.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::threadpool::ThreadPool;

    #[test]
    fn begin_search_eventually_populates_root_entry() {
        let board = Board::new_game();
        let tt = Arc::new(Tt::new(1 << 16));
        let pool = ThreadPool::new(2);
        let deadline = Deadline::in_ms(500);

        begin_search(&board, Arc::clone(&tt), None, &pool, deadline);

        let start = std::time::Instant::now();
        while best_move(&tt, board.hash()).is_none() && start.elapsed().as_millis() < 2000 {
            std::thread::yield_now();
        }

        assert!(best_move(&tt, board.hash()).is_some());
    }
}

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

pub mod about;
pub mod book;
pub mod defs;
pub mod threadpool;
pub mod transposition;
pub mod utils;

use crate::board::Board;
use crate::movegen::defs::Move;
use crate::search;
use crate::search::time::Deadline;
use book::Book;
use defs::Settings;
use std::sync::Arc;
use threadpool::ThreadPool;
use transposition::Tt;

/// Everything a search needs that outlives any single call: the shared
/// transposition table, the thread pool Lazy-SMP workers run on, and the
/// opening book, if one was configured.
pub struct Engine {
    pub settings: Settings,
    pub tt: Arc<Tt>,
    pub book: Option<Arc<Book>>,
    pub pool: ThreadPool,
}

impl Engine {
    /// Fails only if `settings.book_path` was explicitly set and loading
    /// it failed; an engine with no book configured at all never fails
    /// here.
    pub fn new(settings: Settings) -> Result<Self, String> {
        let book = match &settings.book_path {
            Some(path) => {
                let book = Book::load(path).map_err(|e| format!("failed to load opening book: {e}"))?;
                Some(Arc::new(book))
            }
            None => None,
        };

        let tt = Arc::new(Tt::new(settings.tt_slots()));
        let pool = ThreadPool::new(settings.threads);

        Ok(Self { settings, tt, book, pool })
    }

    /// Starts a Lazy-SMP search on `board` and returns immediately; poll
    /// `best_move` for the result.
    pub fn begin_search(&self, board: &Board, deadline: Deadline) {
        search::begin_search(board, Arc::clone(&self.tt), self.book.clone(), &self.pool, deadline);
    }

    pub fn best_move(&self, hash: u64) -> Option<Move> {
        search::best_move(&self.tt, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_with_no_book_never_fails_to_construct() {
        let engine = Engine::new(Settings {
            threads: 2,
            tt_mb: 1,
            ..Settings::default()
        });
        assert!(engine.is_ok());
    }

    #[test]
    fn engine_with_missing_book_path_fails() {
        let engine = Engine::new(Settings {
            book_path: Some("/nonexistent/path/to/book.bin".into()),
            ..Settings::default()
        });
        assert!(engine.is_err());
    }

    #[test]
    fn search_and_read_best_move_round_trip() {
        let engine = Engine::new(Settings {
            threads: 2,
            tt_mb: 1,
            ..Settings::default()
        })
        .unwrap();
        let board = Board::new_game();
        engine.begin_search(&board, Deadline::in_ms(500));

        let start = std::time::Instant::now();
        while engine.best_move(board.hash()).is_none() && start.elapsed().as_millis() < 2000 {
            std::thread::yield_now();
        }
        assert!(engine.best_move(board.hash()).is_some());
    }
}

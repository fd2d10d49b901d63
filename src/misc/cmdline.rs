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

use crate::defs::{FEN_START_POSITION, MAX_MOVEGEN_SEARCH_TIME_MS};
use clap::{value_parser, Arg, ArgAction, ArgMatches};

struct CmdLineArgs {}
impl CmdLineArgs {
    const FEN_LONG: &'static str = "fen";
    const FEN_SHORT: char = 'f';
    const FEN_HELP: &'static str = "Set up the given position";

    // CHESS_NPROC override: number of Lazy-SMP worker threads.
    const THREADS_LONG: &'static str = "threads";
    const THREADS_SHORT: char = 't';
    const THREADS_HELP: &'static str = "Number of search worker threads (overrides CHESS_NPROC)";

    const HASH_LONG: &'static str = "hash";
    const HASH_SHORT: char = 'h';
    const HASH_HELP: &'static str = "Transposition table size in MB";
    const HASH_DEFAULT: usize = 32;

    const MOVETIME_LONG: &'static str = "movetime";
    const MOVETIME_SHORT: char = 'm';
    const MOVETIME_HELP: &'static str = "Search budget per move, in milliseconds";

    const BOOK_LONG: &'static str = "book";
    const BOOK_SHORT: char = 'b';
    const BOOK_HELP: &'static str = "Path to a Polyglot (.bin) opening book";

    const QUIET_LONG: &'static str = "quiet";
    const QUIET_SHORT: char = 'q';
    const QUIET_HELP: &'static str = "No intermediate search stats updates";
}

/// Environment variable consulted for the worker-thread count when
/// `--threads` is not given, per the Lazy-SMP driver's default sizing.
pub const CHESS_NPROC_ENV: &str = "CHESS_NPROC";

pub struct CmdLine {
    arguments: ArgMatches,
}

impl Default for CmdLine {
    fn default() -> Self {
        Self::new()
    }
}

impl CmdLine {
    pub fn new() -> Self {
        Self { arguments: Self::get() }
    }

    pub fn fen(&self) -> String {
        self.arguments
            .get_one::<String>(CmdLineArgs::FEN_LONG)
            .unwrap_or(&FEN_START_POSITION.to_string())
            .clone()
    }

    /// `--threads`, falling back to `CHESS_NPROC`, falling back to the
    /// number of logical CPUs.
    pub fn threads(&self) -> usize {
        if let Some(t) = self.arguments.get_one::<usize>(CmdLineArgs::THREADS_LONG) {
            return *t;
        }
        if let Ok(v) = std::env::var(CHESS_NPROC_ENV) {
            if let Ok(n) = v.parse::<usize>() {
                return n.max(1);
            }
        }
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    pub fn hash(&self) -> usize {
        *self
            .arguments
            .get_one::<usize>(CmdLineArgs::HASH_LONG)
            .unwrap_or(&CmdLineArgs::HASH_DEFAULT)
    }

    pub fn movetime_ms(&self) -> u64 {
        *self
            .arguments
            .get_one::<u64>(CmdLineArgs::MOVETIME_LONG)
            .unwrap_or(&MAX_MOVEGEN_SEARCH_TIME_MS)
    }

    pub fn book(&self) -> Option<String> {
        self.arguments.get_one::<String>(CmdLineArgs::BOOK_LONG).cloned()
    }

    pub fn has_quiet(&self) -> bool {
        self.arguments.get_flag(CmdLineArgs::QUIET_LONG)
    }

    fn get() -> ArgMatches {
        clap::Command::new("chess-search-core")
            .about("Negamax/alpha-beta chess search core with Lazy-SMP and an opening book")
            .disable_help_flag(true)
            .arg(
                Arg::new(CmdLineArgs::FEN_LONG)
                    .short(CmdLineArgs::FEN_SHORT)
                    .long(CmdLineArgs::FEN_LONG)
                    .help(CmdLineArgs::FEN_HELP)
                    .num_args(1)
                    .default_value(FEN_START_POSITION)
                    .value_parser(value_parser!(String)),
            )
            .arg(
                Arg::new(CmdLineArgs::THREADS_LONG)
                    .short(CmdLineArgs::THREADS_SHORT)
                    .long(CmdLineArgs::THREADS_LONG)
                    .help(CmdLineArgs::THREADS_HELP)
                    .value_parser(value_parser!(usize))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::HASH_LONG)
                    .short(CmdLineArgs::HASH_SHORT)
                    .long(CmdLineArgs::HASH_LONG)
                    .help(CmdLineArgs::HASH_HELP)
                    .value_parser(value_parser!(usize))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::MOVETIME_LONG)
                    .short(CmdLineArgs::MOVETIME_SHORT)
                    .long(CmdLineArgs::MOVETIME_LONG)
                    .help(CmdLineArgs::MOVETIME_HELP)
                    .value_parser(value_parser!(u64))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::BOOK_LONG)
                    .short(CmdLineArgs::BOOK_SHORT)
                    .long(CmdLineArgs::BOOK_LONG)
                    .help(CmdLineArgs::BOOK_HELP)
                    .num_args(1)
                    .value_parser(value_parser!(String)),
            )
            .arg(
                Arg::new(CmdLineArgs::QUIET_LONG)
                    .short(CmdLineArgs::QUIET_SHORT)
                    .long(CmdLineArgs::QUIET_LONG)
                    .help(CmdLineArgs::QUIET_HELP)
                    .action(ArgAction::SetTrue),
            )
            .get_matches()
    }
}

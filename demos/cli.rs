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

//! A minimal driver: human plays White from the terminal in coordinate
//! notation ("e2e4"), the engine replies as Black. This is a demo of the
//! library, not a UCI/XBoard interface.

use chess_search_core::board::Board;
use chess_search_core::defs::Side;
use chess_search_core::engine::defs::Settings;
use chess_search_core::engine::utils::parse_coordinate_move;
use chess_search_core::engine::Engine;
use chess_search_core::misc::cmdline::CmdLine;
use chess_search_core::movegen::{checkmated, stalemate};
use chess_search_core::search::time::Deadline;
use std::io::Write;

fn main() {
    env_logger::init();

    let cmdline = CmdLine::new();
    let settings = Settings {
        threads: cmdline.threads(),
        tt_mb: cmdline.hash(),
        move_time_ms: cmdline.movetime_ms(),
        book_path: cmdline.book().map(Into::into),
    };

    let engine = match Engine::new(settings) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("fatal: {e}");
            std::process::exit(1);
        }
    };
    engine.print_ascii_logo();
    engine.print_about();

    let mut board = Board::empty();
    if let Err(e) = board.fen_read(Some(&cmdline.fen())) {
        eprintln!("fatal: bad FEN: {e}");
        std::process::exit(1);
    }

    loop {
        println!("{board}");

        if checkmated(&board, board.us()) {
            println!("checkmate: {:?} has no moves and is in check", board.us());
            break;
        }
        if stalemate(&board) {
            println!("stalemate");
            break;
        }

        if board.us() == Side::White {
            let mv = match read_human_move(&board, &engine) {
                Some(mv) => mv,
                None => break,
            };
            board.apply_move(mv, true);
        } else {
            let deadline = Deadline::in_ms(engine.settings.move_time_ms);
            engine.begin_search(&board, deadline);
            wait_for_search(&engine, board.hash(), deadline);

            match engine.best_move(board.hash()) {
                Some(mv) => {
                    println!("engine plays {}{}", square_str(mv.from), square_str(mv.to));
                    board.apply_move(mv, true);
                }
                None => {
                    println!("engine found no move");
                    break;
                }
            }
        }
    }
}

fn read_human_move(board: &Board, engine: &Engine) -> Option<chess_search_core::movegen::defs::Move> {
    loop {
        print!("your move (or 'quit'): ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            return None;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return None;
        }

        match parse_coordinate_move(line) {
            Some(mv) if engine.execute_move(&mut board.clone(), mv) => return Some(mv),
            _ => println!("not a legal move: {line}"),
        }
    }
}

fn wait_for_search(engine: &Engine, hash: u64, deadline: Deadline) {
    while engine.best_move(hash).is_none() && !deadline.is_expired() {
        std::thread::yield_now();
    }
}

fn square_str(sq: chess_search_core::defs::BoardPos) -> String {
    let file = (b'a' + sq.file as u8) as char;
    let rank = (b'1' + sq.rank as u8) as char;
    format!("{file}{rank}")
}

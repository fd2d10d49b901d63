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

use crate::defs::BoardPos;
use crate::engine::defs::ErrFatal;
use crate::movegen::defs::Move;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

const RECORD_SIZE: usize = 16;
const MAX_MOVES_PER_ITEM: usize = 255;
const PROMOTION_NONE: u16 = 0;
const PROMOTION_QUEEN: u16 = 4;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("opening book file is empty")]
    Empty,
    #[error("failed to read opening book file: {0}")]
    Io(#[from] std::io::Error),
    #[error("opening book file length is not a multiple of the 16-byte record size")]
    Truncated,
}

#[derive(Debug, Clone)]
struct BookItem {
    hash: u64,
    moves: Vec<Move>,
}

/// A loaded, immutable Polyglot opening book. `find` does a binary search
/// over items sorted by hash; the driver then samples one of the matching
/// moves at random.
pub struct Book {
    items: Vec<BookItem>,
    rng: Mutex<SmallRng>,
}

impl Book {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(BookError::Empty);
        }
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(BookError::Truncated);
        }

        let mut items: Vec<BookItem> = Vec::new();
        for chunk in bytes.chunks_exact(RECORD_SIZE) {
            let key = u64::from_be_bytes(chunk[0..8].try_into().unwrap());
            let raw_move = u16::from_be_bytes(chunk[8..10].try_into().unwrap());
            // weight (chunk[10..12]) and learn (chunk[12..16]) are unused.

            let Some(mv) = decode_move(raw_move) else {
                continue;
            };

            match items.last_mut() {
                Some(last) if last.hash == key => {
                    if last.moves.len() < MAX_MOVES_PER_ITEM {
                        last.moves.push(mv);
                    }
                }
                _ => items.push(BookItem { hash: key, moves: vec![mv] }),
            }
        }

        Ok(Self {
            items,
            rng: Mutex::new(SmallRng::from_entropy()),
        })
    }

    /// Binary search by hash. Items are only grouped correctly if the
    /// source file is itself sorted by key, as the Polyglot format
    /// requires.
    fn find_item(&self, hash: u64) -> Option<&BookItem> {
        self.items
            .binary_search_by_key(&hash, |item| item.hash)
            .ok()
            .map(|i| &self.items[i])
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.find_item(hash).is_some()
    }

    /// Picks one of the book's recommended replies for `hash` uniformly at
    /// random. The caller is responsible for re-validating the move with
    /// `is_move_legal` to guard against hash collisions.
    pub fn find(&self, hash: u64) -> Option<Move> {
        let item = self.find_item(hash)?;
        let mut rng = self.rng.lock().expect(ErrFatal::LOCK);
        let idx = rng.gen_range(0..item.moves.len());
        Some(item.moves[idx])
    }
}

fn decode_move(raw: u16) -> Option<Move> {
    let to_file = (raw & 0x7) as i8;
    let to_rank = ((raw >> 3) & 0x7) as i8;
    let from_file = ((raw >> 6) & 0x7) as i8;
    let from_rank = ((raw >> 9) & 0x7) as i8;
    let promotion = (raw >> 12) & 0x7;

    if promotion != PROMOTION_NONE && promotion != PROMOTION_QUEEN {
        return None;
    }

    Some(Move::new(
        BoardPos::new(from_file, from_rank),
        BoardPos::new(to_file, to_rank),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: u64, mv: u16) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&key.to_be_bytes());
        bytes[8..10].copy_from_slice(&mv.to_be_bytes());
        bytes
    }

    #[test]
    fn decode_move_rejects_under_promotion() {
        // promotion field = 1 (knight)
        let raw = 1u16 << 12;
        assert!(decode_move(raw).is_none());
    }

    #[test]
    fn decode_move_accepts_queen_promotion_and_none() {
        assert!(decode_move(0).is_some());
        assert!(decode_move(PROMOTION_QUEEN << 12).is_some());
    }

    #[test]
    fn load_groups_records_with_equal_keys() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("chess_search_core_book_test_{}.bin", std::process::id()));
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&record(1, 0b000_000_000_001)); // e2 type move-ish, doesn't matter here
        bytes.extend_from_slice(&record(1, 0b000_000_000_010));
        bytes.extend_from_slice(&record(2, 0b000_000_000_011));
        std::fs::write(&path, &bytes).unwrap();

        let book = Book::load(&path).unwrap();
        assert!(book.contains(1));
        assert!(book.contains(2));
        assert!(!book.contains(3));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_rejects_truncated_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("chess_search_core_book_truncated_{}.bin", std::process::id()));
        std::fs::write(&path, [0u8; 10]).unwrap();
        assert!(matches!(Book::load(&path), Err(BookError::Truncated)));
        std::fs::remove_file(&path).ok();
    }
}

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

use crate::defs::TRANSPOSITION_TABLE_SIZE;
use crate::engine::defs::ErrFatal;
use crate::movegen::defs::Move;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Exact,
    Upper,
    Lower,
}

/// One cached search result. A freshly-initialised slot has `depth == 0`
/// and `best_move == Move::NONE`; the move generator treats that as "no PV
/// move here".
#[derive(Debug, Clone, Copy)]
pub struct TranspositionEntry {
    pub hash: u64,
    pub best_move: Move,
    pub depth: i8,
    pub value: i32,
    pub bound_kind: BoundKind,
}

impl TranspositionEntry {
    pub fn empty() -> Self {
        Self {
            hash: 0,
            best_move: Move::NONE,
            depth: 0,
            value: 0,
            bound_kind: BoundKind::Exact,
        }
    }

    pub fn has_usable_move(&self) -> bool {
        self.depth != 0 && !self.best_move.is_none()
    }
}

impl Default for TranspositionEntry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fixed-size, open-addressed, single-slot-per-bucket transposition table
/// shared by every search worker. Each slot has its own lock, so workers
/// reading and writing unrelated buckets never contend.
pub struct Tt {
    slots: Vec<Mutex<TranspositionEntry>>,
    protected_hash: AtomicU64,
    mask: u64,
}

impl Tt {
    pub fn new(nr_of_slots: usize) -> Self {
        let nr_of_slots = nr_of_slots.next_power_of_two();
        let mut slots = Vec::with_capacity(nr_of_slots);
        slots.resize_with(nr_of_slots, || Mutex::new(TranspositionEntry::empty()));
        Self {
            slots,
            protected_hash: AtomicU64::new(0),
            mask: (nr_of_slots - 1) as u64,
        }
    }

    pub fn with_default_size() -> Self {
        Self::new(TRANSPOSITION_TABLE_SIZE)
    }

    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    pub fn get(&self, hash: u64) -> TranspositionEntry {
        let slot = self.slots[self.index(hash)].lock().expect(ErrFatal::LOCK);
        if slot.hash == hash {
            *slot
        } else {
            TranspositionEntry::empty()
        }
    }

    pub fn put(&self, entry: TranspositionEntry) {
        let protected = self.protected_hash.load(Ordering::Relaxed);
        let mut slot = self.slots[self.index(entry.hash)].lock().expect(ErrFatal::LOCK);
        let prev = *slot;

        let replace = (prev.hash == entry.hash && prev.depth <= entry.depth)
            || (prev.hash != protected && entry.hash != prev.hash);

        if replace {
            *slot = entry;
        }
    }

    /// Marks `hash` as the root of the current search and makes sure its
    /// slot actually holds `hash`, so the protection in `put` has
    /// something to protect.
    pub fn set_protected(&self, hash: u64) {
        self.protected_hash.store(hash, Ordering::Relaxed);
        let mut slot = self.slots[self.index(hash)].lock().expect(ErrFatal::LOCK);
        if slot.hash != hash {
            *slot = TranspositionEntry {
                hash,
                ..TranspositionEntry::empty()
            };
        }
    }

    pub fn clear(&self) {
        for slot in &self.slots {
            let mut slot = slot.lock().expect(ErrFatal::LOCK);
            *slot = TranspositionEntry::empty();
        }
        self.protected_hash.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_empty_table_returns_sentinel() {
        let tt = Tt::new(1024);
        let entry = tt.get(42);
        assert!(!entry.has_usable_move());
    }

    #[test]
    fn put_then_get_round_trips() {
        let tt = Tt::new(1024);
        let entry = TranspositionEntry {
            hash: 7,
            best_move: Move::new(crate::defs::BoardPos::new(0, 1), crate::defs::BoardPos::new(0, 3)),
            depth: 4,
            value: 100,
            bound_kind: BoundKind::Exact,
        };
        tt.put(entry);
        let fetched = tt.get(7);
        assert!(fetched.has_usable_move());
        assert_eq!(fetched.depth, 4);
    }

    #[test]
    fn shallower_entry_does_not_replace_deeper_one_at_same_hash() {
        let tt = Tt::new(1024);
        tt.put(TranspositionEntry {
            hash: 7,
            depth: 10,
            ..TranspositionEntry::empty()
        });
        tt.put(TranspositionEntry {
            hash: 7,
            depth: 2,
            ..TranspositionEntry::empty()
        });
        assert_eq!(tt.get(7).depth, 10);
    }

    #[test]
    fn protected_slot_survives_colliding_insert() {
        let tt = Tt::new(1024);
        tt.set_protected(7);
        // Force a collision: same bucket, different hash.
        let colliding_hash = 7 + tt.mask as u64 + 1;
        tt.put(TranspositionEntry {
            hash: colliding_hash,
            depth: 99,
            ..TranspositionEntry::empty()
        });
        assert_eq!(tt.get(7).hash, 7);
    }
}

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

use crate::defs::CHECK_SEARCH_TIME_ABOVE_DEPTH;
use std::time::{Duration, Instant};

/// A single wall-clock point in time a search must not run past. Much
/// simpler than the reference engine's UCI-style `TimeControl`/`GameTime`
/// machinery (no increments, no moves-to-go, no game phase) because this
/// crate's driver is always given a flat search budget rather than a full
/// game clock.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn in_ms(ms: u64) -> Self {
        Self(Instant::now() + Duration::from_millis(ms))
    }

    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// `negamax` only pays for a clock syscall above this depth, to keep the
/// leaf-heavy bottom of the tree cheap.
pub fn should_poll_clock(depth: i8) -> bool {
    depth > CHECK_SEARCH_TIME_ABOVE_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_in_the_past_is_expired() {
        let deadline = Deadline::at(Instant::now() - Duration::from_millis(1));
        assert!(deadline.is_expired());
    }

    #[test]
    fn deadline_far_in_the_future_is_not_expired() {
        let deadline = Deadline::in_ms(60_000);
        assert!(!deadline.is_expired());
    }

    #[test]
    fn clock_is_polled_only_above_the_threshold() {
        assert!(!should_poll_clock(CHECK_SEARCH_TIME_ABOVE_DEPTH));
        assert!(should_poll_clock(CHECK_SEARCH_TIME_ABOVE_DEPTH + 1));
    }
}

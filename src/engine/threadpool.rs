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

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

/// Bounded task queue capacity. A `crossbeam_channel::bounded` channel of
/// this size realises the fixed-capacity ring buffer: `try_send` returning
/// `Err(Full)` is "enqueue returns false", and a blocking `recv()` is a
/// worker parked on the queue's condition variable.
const QUEUE_CAPACITY: usize = 256;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// A small worker pool: `n` OS threads pulling closures off one shared
/// bounded channel. Used by the search driver to run one Lazy-SMP worker
/// per target depth.
pub struct ThreadPool {
    sender: Sender<Task>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    pub fn new(nr_of_threads: usize) -> Self {
        let nr_of_threads = nr_of_threads.max(1);
        let (sender, receiver): (Sender<Task>, Receiver<Task>) = bounded(QUEUE_CAPACITY);

        let workers = (0..nr_of_threads)
            .map(|id| spawn_worker(id, receiver.clone()))
            .collect();

        Self { sender, workers }
    }

    /// Blocks until there is room in the queue. Returns `Err(())` only if
    /// every worker thread has already shut down.
    pub fn submit(&self, task: Task) -> Result<(), ()> {
        self.sender.send(task).map_err(|_| ())
    }

    /// Non-blocking enqueue: `false` if the queue is currently full.
    pub fn try_submit(&self, task: Task) -> bool {
        match self.sender.try_send(task) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn nr_of_workers(&self) -> usize {
        self.workers.len()
    }
}

fn spawn_worker(id: usize, receiver: Receiver<Task>) -> JoinHandle<()> {
    thread::Builder::new()
        .name(format!("search-worker-{id}"))
        .spawn(move || {
            while let Ok(task) = receiver.recv() {
                task();
            }
            log::debug!("search worker {id} shutting down");
        })
        .expect("failed to spawn search worker thread")
}

/// Small atomic countdown used by the driver to know when every enqueued
/// search task has finished, independent of the channel itself.
pub struct AtomicRefCount {
    remaining: AtomicUsize,
}

impl AtomicRefCount {
    pub fn new(count: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(count),
        }
    }

    /// Decrements the count; returns `true` if this call brought it to
    /// zero (i.e. the caller was the last one out).
    pub fn dec(&self) -> bool {
        self.remaining.fetch_sub(1, Ordering::AcqRel) == 1
    }

    pub fn get(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }
}

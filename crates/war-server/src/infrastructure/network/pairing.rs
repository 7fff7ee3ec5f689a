//! Match pairing queue.
//!
//! Accepted connections wait here until an opponent arrives.  Connections
//! leave in FIFO pairs: the two oldest entries are always matched together,
//! and a connection is never matched with itself.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Thread-safe FIFO of connections awaiting an opponent.
///
/// The only state shared between the acceptor and anything else.  A single
/// mutex guards the buffer; each operation holds it only for a push or two
/// pops, never across an `.await`.
#[derive(Debug)]
pub struct PairingQueue<T> {
    waiting: Mutex<VecDeque<T>>,
}

impl<T> Default for PairingQueue<T> {
    fn default() -> Self {
        Self {
            waiting: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> PairingQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `conn` to the tail.
    pub fn enqueue(&self, conn: T) {
        self.lock().push_back(conn);
    }

    /// Removes and returns the two oldest entries, or `None` if fewer than two
    /// are waiting.  Never blocks on an empty queue.
    pub fn try_dequeue_pair(&self) -> Option<(T, T)> {
        let mut waiting = self.lock();
        if waiting.len() < 2 {
            return None;
        }
        let first = waiting.pop_front()?;
        let second = waiting.pop_front()?;
        Some((first, second))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        // A panic while holding the lock cannot leave the deque half-updated,
        // so a poisoned lock is still safe to use.
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

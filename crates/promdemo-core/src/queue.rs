//! Fixed-capacity FIFO with non-blocking access on both ends.
//!
//! Backed by a bounded `crossbeam-channel`. Only `try_send`/`try_recv` are
//! ever called, so neither side suspends: a full or empty queue is reported
//! immediately and the caller decides how long to back off.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

use crate::error::{PromDemoError, Result};

/// Default capacity of the work queue.
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded multi-producer multi-consumer FIFO.
///
/// Cloning yields another handle onto the same buffer.
#[derive(Debug, Clone)]
pub struct WorkQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    capacity: usize,
}

impl<T> WorkQueue<T> {
    /// Create a queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PromDemoError::BadConfig(
                "queue capacity must be at least 1".into(),
            ));
        }
        let (tx, rx) = bounded(capacity);
        Ok(Self { tx, rx, capacity })
    }

    /// Attempt to append `item` without waiting.
    ///
    /// Hands the item back when the queue is full.
    pub fn try_enqueue(&self, item: T) -> std::result::Result<(), T> {
        match self.tx.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(item)) | Err(TrySendError::Disconnected(item)) => Err(item),
        }
    }

    /// Attempt to take the oldest item without waiting.
    pub fn try_dequeue(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of items currently buffered.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when a dequeue attempt would return `None`.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// True when an enqueue attempt would hand the item back.
    pub fn is_full(&self) -> bool {
        self.tx.is_full()
    }

    /// Fixed upper bound on buffered items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

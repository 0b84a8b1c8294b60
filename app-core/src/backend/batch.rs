use std::sync::mpsc::TryRecvError;

use crate::backend::LinkReceiver;

/// Outcome of one request in a [`LinkBatch`].
#[derive(Debug, PartialEq)]
pub enum Settled<T> {
    Replied(T),
    /// The request was dropped without a reply (backend gone, worker
    /// panicked or could not be spawned).
    HungUp,
}

/// A set of requests that are in flight at the same time.
///
/// The batch is polled from the UI loop; every request settles exactly
/// once, either with its reply or with [`Settled::HungUp`]. A request that
/// settles never affects the others, so waiting for `is_settled` is a
/// join over all of them.
#[derive(Debug)]
pub struct LinkBatch<K, T> {
    pending: Vec<(K, LinkReceiver<T>)>,
    settled: usize,
}

impl<K, T> Default for LinkBatch<K, T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            settled: 0,
        }
    }
}

impl<K, T> LinkBatch<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: K, rx: LinkReceiver<T>) {
        self.pending.push((key, rx));
    }

    /// Polls every pending request once and returns those that settled
    /// since the last call, in the order they were pushed.
    pub fn poll(&mut self) -> Vec<(K, Settled<T>)> {
        let mut settled = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for (key, rx) in self.pending.drain(..) {
            match rx.try_recv() {
                Ok(reply) => settled.push((key, Settled::Replied(reply))),
                Err(TryRecvError::Empty) => still_pending.push((key, rx)),
                Err(TryRecvError::Disconnected) => settled.push((key, Settled::HungUp)),
            }
        }
        self.pending = still_pending;
        self.settled += settled.len();
        settled
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn num_pending(&self) -> usize {
        self.pending.len()
    }

    pub fn num_settled(&self) -> usize {
        self.settled
    }
}

//! Receive-side reorder buffer.
//!
//! Holds data payloads that arrived ahead of the next expected sequence
//! number until the gap in front of them is filled, then releases the
//! contiguous prefix in order. Stale and duplicate arrivals are rejected,
//! which is what makes delivery exactly-once.

use std::collections::BTreeMap;

/// Reorder buffer for out-of-order data frames.
#[derive(Debug, Default)]
pub struct ReorderBuffer {
    next_expected: u64,
    held: BTreeMap<u64, Vec<u8>>,
}

impl ReorderBuffer {
    /// Create an empty buffer expecting sequence 0 first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a payload for `sequence`.
    ///
    /// Returns `true` if the payload was buffered; `false` for sequences
    /// already delivered (`sequence < next_expected`) or already held.
    /// Rejected payloads are dropped, never re-buffered.
    pub fn insert(&mut self, sequence: u64, payload: Vec<u8>) -> bool {
        if sequence < self.next_expected || self.held.contains_key(&sequence) {
            return false;
        }
        self.held.insert(sequence, payload);
        true
    }

    /// Release the contiguous prefix starting at the next expected sequence.
    ///
    /// Advances `next_expected` past every released payload. The result is
    /// in strictly increasing sequence order with no gaps.
    pub fn drain_ready(&mut self) -> Vec<Vec<u8>> {
        let mut released = Vec::new();
        while let Some(payload) = self.held.remove(&self.next_expected) {
            released.push(payload);
            self.next_expected += 1;
        }
        released
    }

    /// The sequence number required for the next in-order delivery.
    pub fn next_expected(&self) -> u64 {
        self.next_expected
    }

    /// Number of payloads parked beyond the next expected sequence.
    pub fn held_len(&self) -> usize {
        self.held.len()
    }

    /// Check if a sequence is currently parked in the buffer.
    pub fn is_held(&self, sequence: u64) -> bool {
        self.held.contains_key(&sequence)
    }
}

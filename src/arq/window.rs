//! Send-side window bookkeeping.
//!
//! The window owns two pools that share one capacity budget: a FIFO backlog
//! of payloads that have no sequence number yet, and the in-flight map of
//! transmitted-but-unacknowledged frames. Capacity is released when a frame
//! is acknowledged, not when it is transmitted.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use super::frame::Frame;

/// A transmitted data frame awaiting acknowledgment.
///
/// Created on first transmission, refreshed on every retransmission, and
/// removed from the window only after an acknowledgment has been observed.
#[derive(Debug, Clone)]
pub struct PendingFrame {
    frame: Frame,
    last_transmit: Duration,
    acknowledged: bool,
}

impl PendingFrame {
    fn new(frame: Frame, now: Duration) -> Self {
        Self {
            frame,
            last_transmit: now,
            acknowledged: false,
        }
    }

    /// The frame as originally transmitted.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Logical time of the most recent transmission.
    pub fn last_transmit(&self) -> Duration {
        self.last_transmit
    }

    /// Whether an ack for this frame has been observed.
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Check if the retransmission timer has expired at `now`.
    pub fn is_due(&self, now: Duration, timeout: Duration) -> bool {
        !self.acknowledged && self.last_transmit + timeout <= now
    }
}

/// Bounded send window: backlog plus in-flight frames.
///
/// The invariant `queued + in_flight <= capacity` holds at all times;
/// [`SendWindow::enqueue`] is the enforcement point.
#[derive(Debug)]
pub struct SendWindow {
    capacity: usize,
    backlog: VecDeque<Vec<u8>>,
    next_sequence: u64,
    in_flight: BTreeMap<u64, PendingFrame>,
}

impl SendWindow {
    /// Create an empty window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            backlog: VecDeque::new(),
            next_sequence: 0,
            in_flight: BTreeMap::new(),
        }
    }

    /// Check if another payload can be accepted.
    pub fn has_room(&self) -> bool {
        self.backlog.len() + self.in_flight.len() < self.capacity
    }

    /// Accept a payload into the backlog if capacity allows.
    ///
    /// Returns `false` (and leaves the window untouched) when the combined
    /// backlog and in-flight count has reached capacity.
    pub fn enqueue(&mut self, payload: Vec<u8>) -> bool {
        if !self.has_room() {
            return false;
        }
        self.backlog.push_back(payload);
        true
    }

    /// Move backlog payloads into flight, assigning fresh sequence numbers.
    ///
    /// Drains in FIFO order while the in-flight map has room, stamping each
    /// new [`PendingFrame`] with `now`. Returns the frames to transmit,
    /// lowest sequence first.
    pub fn drain_backlog(&mut self, now: Duration) -> Vec<Frame> {
        let mut frames = Vec::new();
        while self.in_flight.len() < self.capacity {
            let Some(payload) = self.backlog.pop_front() else {
                break;
            };
            let frame = Frame::data(self.next_sequence, payload);
            self.next_sequence += 1;
            self.in_flight
                .insert(frame.sequence(), PendingFrame::new(frame.clone(), now));
            frames.push(frame);
        }
        frames
    }

    /// Collect frames whose retransmission timer expired at `now`.
    ///
    /// Each due record has its timer refreshed to `now` and its frame
    /// re-emitted as a clone. No new sequence numbers, no new records.
    pub fn due_retransmissions(&mut self, now: Duration, timeout: Duration) -> Vec<Frame> {
        let mut frames = Vec::new();
        for pending in self.in_flight.values_mut() {
            if pending.is_due(now, timeout) {
                pending.last_transmit = now;
                frames.push(pending.frame.clone());
            }
        }
        frames
    }

    /// Mark one sequence number acknowledged.
    ///
    /// Idempotent: acking an already-acked or already-removed sequence is a
    /// no-op. Returns `true` if the record transitioned to acknowledged.
    pub fn acknowledge(&mut self, sequence: u64) -> bool {
        match self.in_flight.get_mut(&sequence) {
            Some(pending) if !pending.acknowledged => {
                pending.acknowledged = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every in-flight sequence number below `base` acknowledged.
    ///
    /// Returns the number of records that transitioned.
    pub fn acknowledge_below(&mut self, base: u64) -> usize {
        let mut newly_acked = 0;
        for (&sequence, pending) in self.in_flight.iter_mut() {
            if sequence >= base {
                break;
            }
            if !pending.acknowledged {
                pending.acknowledged = true;
                newly_acked += 1;
            }
        }
        newly_acked
    }

    /// Remove every acknowledged record, releasing window capacity.
    ///
    /// Kept separate from [`SendWindow::acknowledge`] so an incoming batch
    /// can be scanned without mutating the map mid-iteration. Returns the
    /// number of records removed.
    pub fn sweep_acknowledged(&mut self) -> usize {
        let before = self.in_flight.len();
        self.in_flight.retain(|_, pending| !pending.acknowledged);
        before - self.in_flight.len()
    }

    /// Look up the pending record for a sequence number.
    pub fn pending(&self, sequence: u64) -> Option<&PendingFrame> {
        self.in_flight.get(&sequence)
    }

    /// Number of payloads waiting for a sequence number.
    pub fn queued_len(&self) -> usize {
        self.backlog.len()
    }

    /// Number of unacknowledged transmitted frames (including those marked
    /// acknowledged but not yet swept).
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Remaining capacity for new `enqueue` calls.
    pub fn available(&self) -> usize {
        self.capacity - (self.backlog.len() + self.in_flight.len())
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The sequence number the next drained payload will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Check if nothing is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.backlog.is_empty() && self.in_flight.is_empty()
    }
}

//! Discrete-event loopback driver.
//!
//! Wires two endpoints through two independent directional channels and
//! advances both by one simulated time step at a time, running the full
//! cycle: flush new transmissions, collect retransmissions, carry the batch
//! across the link, feed the peer's `receive`, and route the resulting acks
//! back through the other direction.

use std::mem;
use std::time::Duration;

use crate::arq::{Endpoint, Frame};
use crate::channel::Channel;

/// Messages completed by each side during one step (or an accumulated run).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Messages the left endpoint delivered to its application.
    pub delivered_left: Vec<Vec<u8>>,
    /// Messages the right endpoint delivered to its application.
    pub delivered_right: Vec<Vec<u8>>,
}

impl StepReport {
    fn absorb(&mut self, mut other: StepReport) {
        self.delivered_left.append(&mut other.delivered_left);
        self.delivered_right.append(&mut other.delivered_right);
    }
}

/// Two endpoints joined by a pair of directional channels.
///
/// Within one step the right side's acks ride the return channel
/// immediately; acks produced by the left side depart with the next step's
/// outbound batch. Either side may originate data, so full-duplex traffic
/// works.
#[derive(Debug)]
pub struct Loopback<ToRight, ToLeft>
where
    ToRight: Channel,
    ToLeft: Channel,
{
    left: Endpoint,
    right: Endpoint,
    to_right: ToRight,
    to_left: ToLeft,
    parked_for_right: Vec<Frame>,
}

impl<ToRight, ToLeft> Loopback<ToRight, ToLeft>
where
    ToRight: Channel,
    ToLeft: Channel,
{
    /// Join two endpoints with one channel per direction.
    pub fn new(left: Endpoint, right: Endpoint, to_right: ToRight, to_left: ToLeft) -> Self {
        Self {
            left,
            right,
            to_right,
            to_left,
            parked_for_right: Vec::new(),
        }
    }

    /// The left endpoint.
    pub fn left(&self) -> &Endpoint {
        &self.left
    }

    /// The left endpoint, mutably (for `send` calls).
    pub fn left_mut(&mut self) -> &mut Endpoint {
        &mut self.left
    }

    /// The right endpoint.
    pub fn right(&self) -> &Endpoint {
        &self.right
    }

    /// The right endpoint, mutably (for `send` calls).
    pub fn right_mut(&mut self) -> &mut Endpoint {
        &mut self.right
    }

    /// Advance both endpoints by one simulated time step of `dt`.
    pub fn step(&mut self, dt: Duration) -> StepReport {
        let mut outbound = mem::take(&mut self.parked_for_right);
        outbound.extend(self.left.flush_new_transmissions());
        outbound.extend(self.left.tick(dt));
        let arriving = self.to_right.transmit(outbound);
        let right_delivery = self.right.receive(&arriving);

        let mut returning = self.right.flush_new_transmissions();
        returning.extend(self.right.tick(dt));
        returning.extend(right_delivery.acks);
        let arriving = self.to_left.transmit(returning);
        let left_delivery = self.left.receive(&arriving);

        // Acks for data the right side originated leave next step.
        self.parked_for_right = left_delivery.acks;

        StepReport {
            delivered_left: left_delivery.messages,
            delivered_right: right_delivery.messages,
        }
    }

    /// Run `steps` steps of `dt` each, accumulating deliveries.
    pub fn run(&mut self, steps: usize, dt: Duration) -> StepReport {
        let mut report = StepReport::default();
        for _ in 0..steps {
            report.absorb(self.step(dt));
        }
        report
    }

    /// Check if both endpoints have drained their send side.
    pub fn is_quiescent(&self) -> bool {
        self.left.is_idle() && self.right.is_idle() && self.parked_for_right.is_empty()
    }
}

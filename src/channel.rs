//! Channel abstraction between endpoints.
//!
//! Endpoints never talk to a channel directly; a driver pushes outbound
//! frames through a [`Channel`] and feeds whatever comes out to the peer's
//! `receive`. A channel may drop, reorder, or duplicate frames, but must not
//! fabricate frames it never received. Keeping the faults here is what keeps
//! [`crate::arq::Endpoint`] deterministic and unit-testable.

use crate::arq::Frame;

/// One direction of a (possibly faulty) link.
pub trait Channel {
    /// Carry a batch of frames, returning the batch that survives transit.
    fn transmit(&mut self, frames: Vec<Frame>) -> Vec<Frame>;
}

/// Any `FnMut(Vec<Frame>) -> Vec<Frame>` is a channel.
impl<F> Channel for F
where
    F: FnMut(Vec<Frame>) -> Vec<Frame>,
{
    fn transmit(&mut self, frames: Vec<Frame>) -> Vec<Frame> {
        self(frames)
    }
}

/// The identity channel: every frame arrives, in order, exactly once.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lossless;

impl Channel for Lossless {
    fn transmit(&mut self, frames: Vec<Frame>) -> Vec<Frame> {
        frames
    }
}

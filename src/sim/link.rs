//! Fault-injecting simulated link.
//!
//! One [`SimulatedLink`] models one direction of a lossy path. Loss and
//! duplication are decided per frame from a seeded RNG, so a given seed
//! always produces the same fault pattern and tests stay reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::arq::Frame;
use crate::channel::Channel;

/// Fault profile for one link direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinkFaults {
    /// Probability in `[0, 1]` that a frame is dropped in transit.
    pub loss_rate: f64,
    /// Probability in `[0, 1]` that a surviving frame arrives twice.
    pub duplicate_rate: f64,
    /// Shuffle each surviving batch before delivery.
    pub reorder: bool,
}

impl LinkFaults {
    /// Drop each frame independently with the given probability.
    pub fn with_loss(loss_rate: f64) -> Self {
        Self {
            loss_rate,
            ..Self::default()
        }
    }

    /// Duplicate each surviving frame with the given probability.
    pub fn with_duplication(mut self, duplicate_rate: f64) -> Self {
        self.duplicate_rate = duplicate_rate;
        self
    }

    /// Shuffle each surviving batch.
    pub fn with_reordering(mut self) -> Self {
        self.reorder = true;
        self
    }
}

/// One direction of a simulated lossy link.
///
/// Loss rates are per direction by design: a forward and a return link are
/// two independent instances, each with its own faults and seed.
#[derive(Debug)]
pub struct SimulatedLink {
    faults: LinkFaults,
    rng: StdRng,
}

impl SimulatedLink {
    /// Create a link with the given fault profile and RNG seed.
    ///
    /// Rates are clamped into `[0, 1]`.
    pub fn new(faults: LinkFaults, seed: u64) -> Self {
        Self {
            faults: LinkFaults {
                loss_rate: faults.loss_rate.clamp(0.0, 1.0),
                duplicate_rate: faults.duplicate_rate.clamp(0.0, 1.0),
                reorder: faults.reorder,
            },
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A link that never drops, duplicates, or reorders.
    pub fn perfect() -> Self {
        Self::new(LinkFaults::default(), 0)
    }

    /// The configured fault profile.
    pub fn faults(&self) -> LinkFaults {
        self.faults
    }
}

impl Channel for SimulatedLink {
    fn transmit(&mut self, frames: Vec<Frame>) -> Vec<Frame> {
        let mut carried = Vec::with_capacity(frames.len());
        for frame in frames {
            if self.faults.loss_rate > 0.0 && self.rng.gen_bool(self.faults.loss_rate) {
                continue;
            }
            if self.faults.duplicate_rate > 0.0 && self.rng.gen_bool(self.faults.duplicate_rate) {
                carried.push(frame.clone());
            }
            carried.push(frame);
        }
        if self.faults.reorder {
            carried.shuffle(&mut self.rng);
        }
        carried
    }
}

//! # CARRIER Protocol
//!
//! **C**hannel-**A**gnostic **R**eliable **R**etransmission
//!
//! CARRIER is a selective-repeat ARQ reliability core: it guarantees
//! in-order, exactly-once delivery of opaque messages across a channel that
//! may drop, reorder, or duplicate frames. It provides:
//!
//! - **Determinism**: a pure state machine advanced only by explicit calls,
//!   with a logical clock and no hidden timers
//! - **Backpressure**: one bounded window shared by queued and in-flight
//!   messages, signalled at `send`
//! - **Fault isolation**: loss, duplication, and reordering live behind an
//!   injectable [`channel::Channel`], never inside the endpoint
//! - **Simplicity**: fixed-interval retransmission, no backoff, no retry cap
//!
//! ## Feature Flags
//!
//! - `sim` (default): Simulation layer (seeded fault injection, loopback driver)
//!
//! ## Modules
//!
//! - [`core`]: Constants and error types (always included)
//! - [`arq`]: Frames, send window, reorder buffer, and the endpoint
//! - [`channel`]: The channel abstraction endpoints are driven through
//! - [`sim`]: Simulated links and the loopback driver (requires `sim` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use carrier_protocol::prelude::*;
//!
//! let mut sender = Endpoint::default();
//! let mut receiver = Endpoint::default();
//!
//! assert!(sender.send(b"hello".to_vec()));
//! let frames = sender.flush_new_transmissions();
//!
//! // Route the frames through any channel; here they survive untouched.
//! let delivery = receiver.receive(&frames);
//! assert_eq!(delivery.messages, vec![b"hello".to_vec()]);
//!
//! // Route the acks back so the sender frees its window slot.
//! sender.receive(&delivery.acks);
//! assert!(sender.is_idle());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Reliability layer (always included)
pub mod arq;

// Channel abstraction (always included)
pub mod channel;

// Simulation layer (feature-gated)
#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub mod sim;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arq::{AckMode, Delivery, Endpoint, EndpointConfig, Frame, FrameKind};
    pub use crate::channel::{Channel, Lossless};
    pub use crate::core::{CarrierError, ConfigError};

    #[cfg(feature = "sim")]
    pub use crate::sim::{LinkFaults, Loopback, SimulatedLink, StepReport};
}

// Re-export commonly used items at crate root
pub use crate::arq::{AckMode, Delivery, Endpoint, EndpointConfig, Frame, FrameKind};
pub use crate::channel::{Channel, Lossless};
pub use crate::core::{CarrierError, ConfigError};

#[cfg(feature = "sim")]
pub use crate::sim::{LinkFaults, Loopback, SimulatedLink};

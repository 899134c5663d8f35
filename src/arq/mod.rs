//! CARRIER Protocol - Reliability Layer
//!
//! Implements:
//! - Selective-repeat ARQ with per-frame or cumulative acknowledgment
//! - Bounded send window with backpressure at `send`
//! - Interval-based retransmission driven by an explicit logical clock
//! - In-order, exactly-once delivery through a reorder buffer

mod endpoint;
mod frame;
mod reorder;
mod window;

pub use endpoint::*;
pub use frame::*;
pub use reorder::*;
pub use window::*;

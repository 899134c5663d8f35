//! CARRIER Protocol - Simulation Layer
//!
//! Implements:
//! - Seeded fault injection (loss, duplication, reordering) per link direction
//! - A discrete-event loopback driver joining two endpoints

mod driver;
mod link;

pub use driver::*;
pub use link::*;

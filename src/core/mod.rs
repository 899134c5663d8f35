//! CARRIER Protocol - Core Layer
//!
//! Constants and error types shared by every other layer.

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::*;

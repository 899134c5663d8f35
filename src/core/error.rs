//! Error types for the CARRIER protocol.
//!
//! The protocol itself has no fatal states: a full window is signalled by
//! [`crate::arq::Endpoint::send`] returning `false`, which is a normal
//! backpressure condition and not an error. The taxonomy here covers the
//! things that *can* be wrong: construction-time configuration.

use std::time::Duration;

use thiserror::Error;

/// Errors detected when validating an endpoint configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Window capacity of zero would reject every `send`.
    #[error("window size must be at least 1")]
    ZeroWindow,

    /// A zero timeout would retransmit every in-flight frame on every tick.
    #[error("retransmission timeout must be positive, got {0:?}")]
    ZeroTimeout(Duration),
}

/// Top-level CARRIER errors.
#[derive(Debug, Error)]
pub enum CarrierError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

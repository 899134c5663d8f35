//! Protocol constants and defaults.
//!
//! These are the conventional defaults for simulated links; every one of
//! them can be overridden through [`crate::arq::EndpointConfig`].

use std::time::Duration;

// =============================================================================
// WINDOW DEFAULTS
// =============================================================================

/// Default send window capacity (queued + in-flight frames).
pub const DEFAULT_WINDOW_SIZE: usize = 4;

// =============================================================================
// TIMING DEFAULTS
// =============================================================================

/// Assumed round-trip time for a simulated link.
pub const DEFAULT_RTT: Duration = Duration::from_millis(100);

/// Retransmission timeout as a multiple of the assumed round-trip time.
///
/// One RTT covers the data frame reaching the peer and the acknowledgment
/// coming back; the second RTT is slack for queueing and reordering.
pub const RTO_RTT_MULTIPLIER: u32 = 2;

/// Default retransmission timeout (`DEFAULT_RTT * RTO_RTT_MULTIPLIER`).
pub const DEFAULT_RETRANSMIT_TIMEOUT: Duration = Duration::from_millis(200);

//! The composed protocol endpoint.
//!
//! An [`Endpoint`] is a deterministic, single-owner state machine advanced
//! only by explicit calls: `send` enqueues, `flush_new_transmissions` moves
//! backlog into flight, `tick` advances the logical clock and collects
//! timed-out retransmissions, and `receive` consumes whatever survived the
//! channel. It never reads a real clock and never touches the channel
//! itself; a driver routes frames between endpoints.

use std::time::Duration;

use crate::core::constants::{DEFAULT_RETRANSMIT_TIMEOUT, DEFAULT_WINDOW_SIZE, RTO_RTT_MULTIPLIER};
use crate::core::error::ConfigError;

use super::frame::{Frame, FrameKind};
use super::reorder::ReorderBuffer;
use super::window::SendWindow;

/// Acknowledgment strategy for the receive side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckMode {
    /// Answer every data frame with its own ack. More ack traffic, but the
    /// sender recovers window slots independently per frame.
    #[default]
    PerFrame,
    /// Answer each batch containing data with a single cumulative ack for
    /// everything below the next expected sequence. Frames parked behind a
    /// gap stay unacknowledged and keep retransmitting until the gap fills.
    Cumulative,
}

/// Endpoint configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Combined capacity of the send backlog and the in-flight window.
    pub window_size: usize,
    /// Fixed interval after which an unacknowledged frame is re-sent.
    pub retransmit_timeout: Duration,
    /// Acknowledgment strategy.
    pub ack_mode: AckMode,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            retransmit_timeout: DEFAULT_RETRANSMIT_TIMEOUT,
            ack_mode: AckMode::PerFrame,
        }
    }
}

impl EndpointConfig {
    /// Derive a configuration from an assumed round-trip time.
    ///
    /// The retransmission timeout is set to [`RTO_RTT_MULTIPLIER`] times the
    /// round-trip time, the conventional slack for ack turnaround.
    pub fn for_rtt(rtt: Duration) -> Self {
        Self {
            retransmit_timeout: rtt * RTO_RTT_MULTIPLIER,
            ..Self::default()
        }
    }

    /// Set the window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the acknowledgment strategy.
    pub fn with_ack_mode(mut self, ack_mode: AckMode) -> Self {
        self.ack_mode = ack_mode;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.retransmit_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout(self.retransmit_timeout));
        }
        Ok(())
    }
}

/// Output of [`Endpoint::receive`]: completed messages plus acks to route
/// back to the peer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Messages completed by this batch, in send order, exactly once each.
    pub messages: Vec<Vec<u8>>,
    /// Acknowledgment frames to transmit back through the channel.
    pub acks: Vec<Frame>,
}

/// Selective-repeat ARQ endpoint.
///
/// Owns the send window, the receive reorder buffer, and a logical clock
/// advanced only by [`Endpoint::tick`].
#[derive(Debug)]
pub struct Endpoint {
    window: SendWindow,
    reorder: ReorderBuffer,
    retransmit_timeout: Duration,
    ack_mode: AckMode,
    now: Duration,
}

impl Endpoint {
    /// Create an endpoint from a validated configuration.
    pub fn new(config: EndpointConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: EndpointConfig) -> Self {
        Self {
            window: SendWindow::new(config.window_size),
            reorder: ReorderBuffer::new(),
            retransmit_timeout: config.retransmit_timeout,
            ack_mode: config.ack_mode,
            now: Duration::ZERO,
        }
    }

    /// Queue a message if the window has space.
    ///
    /// Returns `false` without side effects when the combined backlog and
    /// in-flight count has reached the window size. This is the only
    /// backpressure signal; the caller re-submits once capacity frees up.
    pub fn send(&mut self, message: impl Into<Vec<u8>>) -> bool {
        self.window.enqueue(message.into())
    }

    /// Drain queued messages into new data frames, up to window capacity.
    ///
    /// The oldest queued message gets the lowest new sequence number. Each
    /// emitted frame is recorded in flight with its timer set to the
    /// current logical time.
    pub fn flush_new_transmissions(&mut self) -> Vec<Frame> {
        self.window.drain_backlog(self.now)
    }

    /// Advance the logical clock by `dt` and collect due retransmissions.
    ///
    /// Every unacknowledged frame whose timer expired is re-emitted with a
    /// refreshed timer. Retransmission is purely interval-based: no backoff
    /// and no retry cap, so the endpoint retries until acknowledged.
    pub fn tick(&mut self, dt: Duration) -> Vec<Frame> {
        self.now += dt;
        self.window
            .due_retransmissions(self.now, self.retransmit_timeout)
    }

    /// Process frames that arrived from the channel, in input order.
    ///
    /// Acks mark their in-flight records; data frames are offered to the
    /// reorder buffer and answered according to the configured [`AckMode`].
    /// Duplicated data is acked again but never delivered twice. After the
    /// batch, the contiguous prefix is drained for delivery and acknowledged
    /// in-flight records are swept, releasing window capacity.
    pub fn receive(&mut self, incoming: &[Frame]) -> Delivery {
        let mut acks = Vec::new();
        let mut saw_data = false;

        for frame in incoming {
            match frame.kind() {
                FrameKind::Ack => {
                    self.window.acknowledge(frame.sequence());
                }
                FrameKind::CumulativeAck => {
                    self.window.acknowledge_below(frame.sequence());
                }
                FrameKind::Data => {
                    self.reorder
                        .insert(frame.sequence(), frame.payload().to_vec());
                    saw_data = true;
                    // Duplicates are acked too: the original ack may have
                    // been lost and the sender's slot is still occupied.
                    if self.ack_mode == AckMode::PerFrame {
                        acks.push(Frame::ack(frame.sequence()));
                    }
                }
            }
        }

        let messages = self.reorder.drain_ready();

        if self.ack_mode == AckMode::Cumulative && saw_data {
            acks.push(Frame::cumulative_ack(self.reorder.next_expected()));
        }

        self.window.sweep_acknowledged();

        Delivery { messages, acks }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The sequence number required for the next in-order delivery.
    pub fn next_expected(&self) -> u64 {
        self.reorder.next_expected()
    }

    /// Number of transmitted frames awaiting acknowledgment.
    pub fn in_flight_len(&self) -> usize {
        self.window.in_flight_len()
    }

    /// Number of messages queued but not yet sequenced.
    pub fn queued_len(&self) -> usize {
        self.window.queued_len()
    }

    /// Window slots still available to `send`.
    pub fn window_available(&self) -> usize {
        self.window.available()
    }

    /// Check if the send side has nothing queued and nothing in flight.
    pub fn is_idle(&self) -> bool {
        self.window.is_idle()
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::from_config(EndpointConfig::default())
    }
}

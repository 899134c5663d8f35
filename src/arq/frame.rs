//! Frame types for the CARRIER reliability layer.
//!
//! A frame is the immutable unit handed to the channel: a sequence number,
//! a kind, and (for data frames) an opaque payload. There is no wire
//! encoding; channels in this crate move frames as in-memory values.

/// Frame kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Carries an application payload for one sequence number.
    Data,
    /// Acknowledges exactly one sequence number.
    Ack,
    /// Acknowledges every sequence number below the carried base.
    CumulativeAck,
}

/// Immutable wire unit exchanged between endpoints.
///
/// Identity is `(sequence, kind)`: a data frame and the ack that answers it
/// share a sequence number but are distinct frames. Retransmissions are
/// clones of the original frame, never re-sequenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    sequence: u64,
    kind: FrameKind,
    payload: Vec<u8>,
}

impl Frame {
    /// Create a data frame carrying `payload` under `sequence`.
    pub fn data(sequence: u64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            sequence,
            kind: FrameKind::Data,
            payload: payload.into(),
        }
    }

    /// Create an ack frame for a single sequence number.
    pub fn ack(sequence: u64) -> Self {
        Self {
            sequence,
            kind: FrameKind::Ack,
            payload: Vec::new(),
        }
    }

    /// Create a cumulative ack covering every sequence number below `base`.
    pub fn cumulative_ack(base: u64) -> Self {
        Self {
            sequence: base,
            kind: FrameKind::CumulativeAck,
            payload: Vec::new(),
        }
    }

    /// The frame's sequence number (for cumulative acks, the exclusive base).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The frame kind.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Check if this is a data frame.
    pub fn is_data(&self) -> bool {
        self.kind == FrameKind::Data
    }

    /// Check if this is an acknowledgment (single or cumulative).
    pub fn is_ack(&self) -> bool {
        matches!(self.kind, FrameKind::Ack | FrameKind::CumulativeAck)
    }

    /// Borrow the payload (empty for acks).
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the frame and take its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

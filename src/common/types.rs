// src/common/types.rs

/// One IR reading, optionally paired with the time it was taken.
///
/// `ir` is passed through untouched; a zero may be a real reading or a read
/// that produced nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sample {
    pub ir: u32,
    /// Milliseconds since start. Only set in the timestamped stream.
    pub timestamp_ms: Option<u32>,
}

impl Sample {
    pub const fn untimed(ir: u32) -> Self {
        Sample { ir, timestamp_ms: None }
    }

    pub const fn at(timestamp_ms: u32, ir: u32) -> Self {
        Sample { ir, timestamp_ms: Some(timestamp_ms) }
    }
}

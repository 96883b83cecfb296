// src/acquisition/throttle.rs

use crate::common::types::Sample;
use crate::stream::encode_line;
use core::fmt::{self, Write};

/// Gates output to at most one line per `interval_ms`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EmitThrottle {
    last_emit: Option<u32>,
    interval_ms: u32,
}

impl EmitThrottle {
    pub const fn new(interval_ms: u32) -> Self {
        EmitThrottle { last_emit: None, interval_ms }
    }

    pub const fn last_emit(&self) -> Option<u32> {
        self.last_emit
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Nothing emitted yet is always due.
    pub fn is_due(&self, now: u32) -> bool {
        is_due(self.last_emit, now, self.interval_ms)
    }

    /// Writes `sample` if due, stamping it with `now`.
    ///
    /// Returns whether a line was written. The throttle only moves forward
    /// after the sink accepted the line.
    pub fn emit_if_due<W: Write>(
        &mut self,
        sink: &mut W,
        sample: &Sample,
        now: u32,
    ) -> Result<bool, fmt::Error> {
        if !self.is_due(now) {
            return Ok(false);
        }
        write_stamped(sink, sample, now)?;
        self.last_emit = Some(now);
        Ok(true)
    }
}

/// Stateless form of [`EmitThrottle::emit_if_due`].
///
/// Returns the new last-emission time: `Some(now)` if a line was written,
/// otherwise `last_emit` unchanged. No I/O happens when the line is not due.
pub fn emit_if_due<W: Write>(
    sink: &mut W,
    sample: &Sample,
    now: u32,
    last_emit: Option<u32>,
    interval_ms: u32,
) -> Result<Option<u32>, fmt::Error> {
    if !is_due(last_emit, now, interval_ms) {
        return Ok(last_emit);
    }
    write_stamped(sink, sample, now)?;
    Ok(Some(now))
}

fn is_due(last_emit: Option<u32>, now: u32, interval_ms: u32) -> bool {
    match last_emit {
        None => true,
        Some(last) => now.wrapping_sub(last) >= interval_ms,
    }
}

fn write_stamped<W: Write>(sink: &mut W, sample: &Sample, now: u32) -> fmt::Result {
    sink.write_str(&encode_line(&Sample::at(now, sample.ir)))
}

// src/stream/format.rs

use crate::common::types::Sample;
use arrayvec::ArrayString;
use core::fmt::{self, Write};

/// Longest possible line: `4294967295,4294967295\n`.
pub const LINE_CAPACITY: usize = 24;

/// Room for the halt message plus its newline.
pub const DIAGNOSTIC_CAPACITY: usize = 64;

/// Renders `sample` as one newline-terminated line.
///
/// The whole line is built before anything reaches the sink, so a line is
/// either written completely or not at all.
pub fn encode_line(sample: &Sample) -> ArrayString<LINE_CAPACITY> {
    let mut line = ArrayString::new();
    // Cannot overflow: both fields are u32.
    let _ = match sample.timestamp_ms {
        Some(ts) => write!(line, "{},{}\n", ts, sample.ir),
        None => write!(line, "{}\n", sample.ir),
    };
    line
}

/// Renders an operator message as one newline-terminated line.
///
/// Fails if the message does not fit, so the sink never sees part of it.
pub fn encode_diagnostic(message: &str) -> Result<ArrayString<DIAGNOSTIC_CAPACITY>, fmt::Error> {
    let mut line = ArrayString::new();
    line.try_push_str(message).map_err(|_| fmt::Error)?;
    line.try_push('\n').map_err(|_| fmt::Error)?;
    Ok(line)
}

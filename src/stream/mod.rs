// src/stream/mod.rs

//! The line-oriented text stream.
//!
//! Two formats share one stream type:
//!
//! * timestamped: `<ms>,<ir>\n`
//! * untimed: `<ir>\n`

mod format;
mod parse;

pub use format::{encode_diagnostic, encode_line, DIAGNOSTIC_CAPACITY, LINE_CAPACITY};
pub use parse::{LineError, StreamLine};

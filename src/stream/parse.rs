// src/stream/parse.rs

use core::str::FromStr;

/// One decoded stream line, as read back on the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StreamLine {
    pub timestamp_ms: Option<u32>,
    pub ir: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("empty line")]
    Empty,

    #[error("expected at most two comma-separated fields")]
    TooManyFields,

    #[error("timestamp is not an unsigned integer")]
    InvalidTimestamp,

    #[error("IR value is not an unsigned integer")]
    InvalidValue,
}

impl StreamLine {
    /// Decodes either wire format. Surrounding whitespace, including the
    /// line terminator, is ignored.
    ///
    /// A line without a comma is a bare IR value. Anything else that is not
    /// two unsigned integers (such as the startup diagnostic) is rejected.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(LineError::Empty);
        }

        let mut fields = line.split(',');
        let first = fields.next().unwrap_or_default().trim();
        let second = fields.next().map(str::trim);
        if fields.next().is_some() {
            return Err(LineError::TooManyFields);
        }

        match second {
            None => {
                let ir = first.parse().map_err(|_| LineError::InvalidValue)?;
                Ok(StreamLine { timestamp_ms: None, ir })
            }
            Some(value) => {
                let ts = first.parse().map_err(|_| LineError::InvalidTimestamp)?;
                let ir = value.parse().map_err(|_| LineError::InvalidValue)?;
                Ok(StreamLine { timestamp_ms: Some(ts), ir })
            }
        }
    }
}

impl FromStr for StreamLine {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

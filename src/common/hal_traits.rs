// src/common/hal_traits.rs

use super::config::{Channel, SensorConfig};
use super::timing::BusSpeed;
use core::fmt::Debug;

/// The sensor operations the acquisition loop relies on.
///
/// Register semantics stay behind this trait; the loop only sequences calls.
pub trait IrSensor {
    /// Error raised by configuration writes.
    type Error: Debug;

    /// Returns `true` if a supported sensor answers on the bus.
    ///
    /// `speed` is the clock rate the bus was brought up at. Implementations
    /// whose bus is already configured may only use it for diagnostics.
    fn probe(&mut self, speed: BusSpeed) -> bool;

    /// Applies `config` as a full overwrite of the device settings.
    fn configure(&mut self, config: &SensorConfig) -> Result<(), Self::Error>;

    /// Sets one emitter's drive current.
    fn set_channel_current(&mut self, channel: Channel, level: u8) -> Result<(), Self::Error>;

    /// Returns the latest IR intensity.
    ///
    /// Failed reads are not distinguished from real readings: an
    /// implementation that cannot produce a value returns `0`.
    fn read_ir(&mut self) -> u32;
}

/// Monotonic millisecond counter, started at boot or at construction.
///
/// The value wraps at `u32::MAX`; compare instants with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Milliseconds elapsed since the clock was created (requires 'std' feature).
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        StdClock { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation gives the same wrap-around as a 32-bit hardware counter.
        self.start.elapsed().as_millis() as u32
    }
}

/// Adapts a byte writer (serial port, stdout) to the line sink (requires 'std' feature).
///
/// Each `write_str` is flushed immediately so a line is visible as soon as
/// it is emitted.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W: std::io::Write> {
    inner: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        IoSink { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> core::fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
        self.inner.flush().map_err(|_| core::fmt::Error)
    }
}

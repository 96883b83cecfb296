// src/common/timing.rs

use core::time::Duration;

/// Minimum spacing between lines in the timestamped stream.
/// Matches the 100 Hz hardware sample rate.
pub const EMIT_INTERVAL: Duration = Duration::from_millis(10);

/// How long a single IR read waits for the FIFO before giving up.
pub const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// Pause between FIFO pointer checks while waiting for a sample.
pub const READ_POLL_DELAY: Duration = Duration::from_millis(1);

/// Upper bound on waiting for the soft-reset bit to clear.
pub const RESET_TIMEOUT: Duration = Duration::from_millis(100);

/// Pause between MODE_CONFIG checks while a soft reset is in progress.
pub const RESET_POLL_DELAY: Duration = Duration::from_millis(1);

/// I2C clock rates the sensor supports.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusSpeed {
    /// 100 kHz.
    Standard,
    /// 400 kHz, the rate used for acquisition.
    Fast,
}

impl BusSpeed {
    pub const fn hz(self) -> u32 {
        match self {
            BusSpeed::Standard => 100_000,
            BusSpeed::Fast => 400_000,
        }
    }
}

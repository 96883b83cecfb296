// src/common/error.rs

use core::fmt::Debug;

/// A raw numeric setting that the MAX30102 cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported sample averaging factor: {0}")]
    SampleAverage(u8),

    #[error("unsupported LED mode: {0}")]
    LedMode(u8),

    #[error("unsupported sample rate: {0} Hz")]
    SampleRate(u16),

    #[error("unsupported pulse width: {0} us")]
    PulseWidth(u16),

    #[error("unsupported ADC range: {0} nA")]
    AdcRange(u16),
}

/// Why the acquisition loop refused to start.
///
/// Both variants are terminal: the loop reports them once on the output
/// stream and never produces a sample afterwards.
#[derive(Debug, thiserror::Error)]
pub enum InitError<E = ()>
where
    E: Debug,
{
    /// The probe did not find a MAX30102 on the bus.
    #[error("sensor absent")]
    SensorAbsent,

    /// The sensor answered the probe but a configuration write failed.
    #[error("bus error during configuration: {0:?}")]
    Bus(E),
}

/// Errors raised by the register-level driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError<E = ()>
where
    E: Debug,
{
    /// Underlying I2C error from the HAL implementation.
    #[error("I2C error: {0:?}")]
    I2c(E),

    /// PART_ID register did not hold the MAX30102 identifier.
    #[error("unexpected part id: {0:#04x}")]
    WrongPartId(u8),

    /// The soft-reset bit never cleared.
    #[error("soft reset did not complete")]
    ResetTimeout,
}

impl<E: Debug> From<E> for DriverError<E> {
    fn from(e: E) -> Self {
        DriverError::I2c(e)
    }
}

impl<E: Debug> InitError<E> {
    /// Operator-facing diagnostic written to the output stream on halt.
    pub const fn diagnostic(&self) -> &'static str {
        match self {
            InitError::SensorAbsent => "MAX30102 was not found. Please check wiring/power.",
            InitError::Bus(_) => "MAX30102 configuration failed. Please check wiring/power.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_config_error_messages() {
        let mut out: heapless::String<64> = heapless::String::new();
        write!(out, "{}", ConfigError::SampleRate(123)).unwrap();
        assert_eq!(out.as_str(), "unsupported sample rate: 123 Hz");
    }

    #[test]
    fn test_driver_error_from_bus_error() {
        let err: DriverError<u8> = 7u8.into();
        assert!(matches!(err, DriverError::I2c(7)));
    }

    #[test]
    fn test_diagnostics_are_single_lines() {
        let absent: InitError<()> = InitError::SensorAbsent;
        let bus: InitError<()> = InitError::Bus(());
        assert!(!absent.diagnostic().contains('\n'));
        assert!(!bus.diagnostic().contains('\n'));
        assert_ne!(absent.diagnostic(), bus.diagnostic());
    }
}

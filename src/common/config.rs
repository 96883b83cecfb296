// src/common/config.rs

//! Fixed sensor settings and the two acquisition presets.
//!
//! Every setting is a typed enum so that only values the MAX30102 can
//! actually encode reach the driver. The raw numbers used on datasheets
//! convert in through `TryFrom`.

use core::convert::TryFrom;

use super::error::ConfigError;
use super::timing::EMIT_INTERVAL;

/// Number of raw readings the sensor averages into one FIFO sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SampleAverage {
    X1,
    X2,
    X4,
    X8,
    X16,
    X32,
}

impl SampleAverage {
    pub const fn count(self) -> u8 {
        match self {
            SampleAverage::X1 => 1,
            SampleAverage::X2 => 2,
            SampleAverage::X4 => 4,
            SampleAverage::X8 => 8,
            SampleAverage::X16 => 16,
            SampleAverage::X32 => 32,
        }
    }
}

impl TryFrom<u8> for SampleAverage {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SampleAverage::X1),
            2 => Ok(SampleAverage::X2),
            4 => Ok(SampleAverage::X4),
            8 => Ok(SampleAverage::X8),
            16 => Ok(SampleAverage::X16),
            32 => Ok(SampleAverage::X32),
            other => Err(ConfigError::SampleAverage(other)),
        }
    }
}

/// Which emitters the sensor drives.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LedMode {
    /// Mode 1: Red only.
    RedOnly,
    /// Mode 2: Red and IR.
    RedIr,
    /// Mode 3: slot-scheduled multi-LED. The MAX30102 has only Red and IR,
    /// so both slots are filled and each sample carries two channels.
    MultiLed,
}

impl LedMode {
    /// Number of 3-byte channels in each FIFO sample.
    pub const fn active_leds(self) -> usize {
        match self {
            LedMode::RedOnly => 1,
            LedMode::RedIr | LedMode::MultiLed => 2,
        }
    }
}

impl TryFrom<u8> for LedMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LedMode::RedOnly),
            2 => Ok(LedMode::RedIr),
            3 => Ok(LedMode::MultiLed),
            other => Err(ConfigError::LedMode(other)),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SampleRate {
    Hz50,
    Hz100,
    Hz200,
    Hz400,
    Hz800,
    Hz1000,
    Hz1600,
    Hz3200,
}

impl SampleRate {
    pub const fn hz(self) -> u16 {
        match self {
            SampleRate::Hz50 => 50,
            SampleRate::Hz100 => 100,
            SampleRate::Hz200 => 200,
            SampleRate::Hz400 => 400,
            SampleRate::Hz800 => 800,
            SampleRate::Hz1000 => 1000,
            SampleRate::Hz1600 => 1600,
            SampleRate::Hz3200 => 3200,
        }
    }
}

impl TryFrom<u16> for SampleRate {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            50 => Ok(SampleRate::Hz50),
            100 => Ok(SampleRate::Hz100),
            200 => Ok(SampleRate::Hz200),
            400 => Ok(SampleRate::Hz400),
            800 => Ok(SampleRate::Hz800),
            1000 => Ok(SampleRate::Hz1000),
            1600 => Ok(SampleRate::Hz1600),
            3200 => Ok(SampleRate::Hz3200),
            other => Err(ConfigError::SampleRate(other)),
        }
    }
}

/// LED pulse width, which also fixes the ADC resolution (15 to 18 bits).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PulseWidth {
    Us69,
    Us118,
    Us215,
    Us411,
}

impl PulseWidth {
    pub const fn micros(self) -> u16 {
        match self {
            PulseWidth::Us69 => 69,
            PulseWidth::Us118 => 118,
            PulseWidth::Us215 => 215,
            PulseWidth::Us411 => 411,
        }
    }
}

impl TryFrom<u16> for PulseWidth {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            69 => Ok(PulseWidth::Us69),
            118 => Ok(PulseWidth::Us118),
            215 => Ok(PulseWidth::Us215),
            411 => Ok(PulseWidth::Us411),
            other => Err(ConfigError::PulseWidth(other)),
        }
    }
}

/// ADC full-scale range in nA.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AdcRange {
    Na2048,
    Na4096,
    Na8192,
    Na16384,
}

impl AdcRange {
    pub const fn nanoamps(self) -> u16 {
        match self {
            AdcRange::Na2048 => 2048,
            AdcRange::Na4096 => 4096,
            AdcRange::Na8192 => 8192,
            AdcRange::Na16384 => 16384,
        }
    }
}

impl TryFrom<u16> for AdcRange {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2048 => Ok(AdcRange::Na2048),
            4096 => Ok(AdcRange::Na4096),
            8192 => Ok(AdcRange::Na8192),
            16384 => Ok(AdcRange::Na16384),
            other => Err(ConfigError::AdcRange(other)),
        }
    }
}

/// An emitter channel whose drive current can be set on its own.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Channel {
    Red,
    Ir,
}

/// Initialization parameters, applied once before the first sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SensorConfig {
    /// Drive level written to every LED amplitude register during setup.
    pub led_brightness: u8,
    pub sample_average: SampleAverage,
    pub led_mode: LedMode,
    pub sample_rate: SampleRate,
    pub pulse_width: PulseWidth,
    pub adc_range: AdcRange,
    /// IR drive current applied after setup.
    pub ir_current: u8,
    /// Red drive current applied after setup. Zero turns the Red LED off.
    pub red_current: u8,
}

impl SensorConfig {
    /// Settings for the timestamped, throttled stream.
    pub const TIMESTAMPED: SensorConfig = SensorConfig {
        led_brightness: 0x1F,
        sample_average: SampleAverage::X1,
        led_mode: LedMode::RedIr,
        sample_rate: SampleRate::Hz100,
        pulse_width: PulseWidth::Us411,
        adc_range: AdcRange::Na16384,
        ir_current: 0x1F,
        red_current: 0x00,
    };

    /// Settings for the bare-value stream. Only the averaging differs.
    pub const UNTIMED: SensorConfig = SensorConfig {
        sample_average: SampleAverage::X4,
        ..Self::TIMESTAMPED
    };
}

/// How polled samples turn into output lines.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EmitMode {
    /// `timestamp,ir` lines, at most one per `interval_ms`.
    Throttled { interval_ms: u32 },
    /// One bare `ir` line per poll.
    EveryPoll,
}

/// Sensor settings paired with the emission policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AcquisitionConfig {
    pub sensor: SensorConfig,
    pub emit: EmitMode,
}

impl AcquisitionConfig {
    pub const fn timestamped() -> Self {
        AcquisitionConfig {
            sensor: SensorConfig::TIMESTAMPED,
            emit: EmitMode::Throttled { interval_ms: EMIT_INTERVAL.as_millis() as u32 },
        }
    }

    pub const fn untimed() -> Self {
        AcquisitionConfig {
            sensor: SensorConfig::UNTIMED,
            emit: EmitMode::EveryPoll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_fixed_constants() {
        let c = SensorConfig::TIMESTAMPED;
        assert_eq!(c.led_brightness, 0x1F);
        assert_eq!(c.sample_average.count(), 1);
        assert_eq!(c.led_mode, LedMode::RedIr);
        assert_eq!(c.sample_rate.hz(), 100);
        assert_eq!(c.pulse_width.micros(), 411);
        assert_eq!(c.adc_range.nanoamps(), 16384);
        assert_eq!(c.ir_current, 0x1F);
        assert_eq!(c.red_current, 0x00);
    }

    #[test]
    fn test_variants_differ_only_in_averaging() {
        let timed = SensorConfig::TIMESTAMPED;
        let untimed = SensorConfig::UNTIMED;
        assert_eq!(untimed.sample_average.count(), 4);
        assert_eq!(SensorConfig { sample_average: SampleAverage::X1, ..untimed }, timed);
    }

    #[test]
    fn test_acquisition_presets() {
        assert_eq!(
            AcquisitionConfig::timestamped().emit,
            EmitMode::Throttled { interval_ms: 10 }
        );
        assert_eq!(AcquisitionConfig::untimed().emit, EmitMode::EveryPoll);
    }

    #[test]
    fn test_raw_value_conversions() {
        assert_eq!(SampleAverage::try_from(4), Ok(SampleAverage::X4));
        assert_eq!(SampleAverage::try_from(3), Err(ConfigError::SampleAverage(3)));
        assert_eq!(LedMode::try_from(2), Ok(LedMode::RedIr));
        assert_eq!(LedMode::try_from(0), Err(ConfigError::LedMode(0)));
        assert_eq!(SampleRate::try_from(100), Ok(SampleRate::Hz100));
        assert_eq!(SampleRate::try_from(99), Err(ConfigError::SampleRate(99)));
        assert_eq!(PulseWidth::try_from(411), Ok(PulseWidth::Us411));
        assert_eq!(PulseWidth::try_from(400), Err(ConfigError::PulseWidth(400)));
        assert_eq!(AdcRange::try_from(16384), Ok(AdcRange::Na16384));
        assert_eq!(AdcRange::try_from(1000), Err(ConfigError::AdcRange(1000)));
    }

    #[test]
    fn test_conversions_round_trip_through_accessors() {
        for n in [1u8, 2, 4, 8, 16, 32] {
            assert_eq!(SampleAverage::try_from(n).unwrap().count(), n);
        }
        for hz in [50u16, 100, 200, 400, 800, 1000, 1600, 3200] {
            assert_eq!(SampleRate::try_from(hz).unwrap().hz(), hz);
        }
    }

    #[test]
    fn test_active_leds() {
        assert_eq!(LedMode::RedOnly.active_leds(), 1);
        assert_eq!(LedMode::RedIr.active_leds(), 2);
        assert_eq!(LedMode::MultiLed.active_leds(), 2);
    }
}

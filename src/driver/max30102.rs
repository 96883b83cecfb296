// src/driver/max30102.rs

//! Register-level MAX30102 driver over embedded-hal 1.0 I2C.

use crate::common::{
    config::{AdcRange, Channel, LedMode, PulseWidth, SampleAverage, SampleRate, SensorConfig},
    error::DriverError,
    hal_traits::IrSensor,
    timing::{BusSpeed, READ_POLL_DELAY, READ_TIMEOUT, RESET_POLL_DELAY, RESET_TIMEOUT},
};
use core::time::Duration;
use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, warn};

/// Fixed 7-bit bus address of the MAX30102.
pub const DEFAULT_ADDRESS: u8 = 0x57;

/// Value of PART_ID on every MAX30102.
pub const EXPECTED_PART_ID: u8 = 0x15;

/// Samples are 18 bits wide, left-padded in three bytes.
const SAMPLE_MASK: u32 = 0x3_FFFF;

/// FIFO read/write pointers are 5 bits (32 entries).
const FIFO_POINTER_MASK: u8 = 0x1F;

/// Bytes per channel in a FIFO sample.
const CHANNEL_LEN: usize = 3;

/// Two slots at most: the part only has Red and IR emitters.
const MAX_SAMPLE_LEN: usize = 2 * CHANNEL_LEN;

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Register {
    FifoWritePointer = 0x04,
    OverflowCounter = 0x05,
    FifoReadPointer = 0x06,
    FifoData = 0x07,
    FifoConfig = 0x08,
    ModeConfig = 0x09,
    Spo2Config = 0x0A,
    Led1PulseAmplitude = 0x0C,
    Led2PulseAmplitude = 0x0D,
    MultiLedControl1 = 0x11,
    RevisionId = 0xFE,
    PartId = 0xFF,
}

// --- MODE_CONFIG bits ---
const MODE_SHUTDOWN: u8 = 0x80;
const MODE_RESET: u8 = 0x40;

// --- FIFO_CONFIG bits ---
const FIFO_ROLLOVER_ENABLE: u8 = 0x10;
const FIFO_ALMOST_FULL_15: u8 = 0x0F;

// --- MULTI_LED slot sources ---
const SLOT_RED: u8 = 0x01;
const SLOT_IR: u8 = 0x02;

fn mode_bits(mode: LedMode) -> u8 {
    match mode {
        LedMode::RedOnly => 0x02,
        LedMode::RedIr => 0x03,
        LedMode::MultiLed => 0x07,
    }
}

fn fifo_config_bits(average: SampleAverage) -> u8 {
    let avg: u8 = match average {
        SampleAverage::X1 => 0,
        SampleAverage::X2 => 1,
        SampleAverage::X4 => 2,
        SampleAverage::X8 => 3,
        SampleAverage::X16 => 4,
        SampleAverage::X32 => 5,
    };
    (avg << 5) | FIFO_ROLLOVER_ENABLE | FIFO_ALMOST_FULL_15
}

fn spo2_config_bits(range: AdcRange, rate: SampleRate, width: PulseWidth) -> u8 {
    let range: u8 = match range {
        AdcRange::Na2048 => 0,
        AdcRange::Na4096 => 1,
        AdcRange::Na8192 => 2,
        AdcRange::Na16384 => 3,
    };
    let rate: u8 = match rate {
        SampleRate::Hz50 => 0,
        SampleRate::Hz100 => 1,
        SampleRate::Hz200 => 2,
        SampleRate::Hz400 => 3,
        SampleRate::Hz800 => 4,
        SampleRate::Hz1000 => 5,
        SampleRate::Hz1600 => 6,
        SampleRate::Hz3200 => 7,
    };
    let width: u8 = match width {
        PulseWidth::Us69 => 0,
        PulseWidth::Us118 => 1,
        PulseWidth::Us215 => 2,
        PulseWidth::Us411 => 3,
    };
    (range << 5) | (rate << 2) | width
}

fn slot_bits(mode: LedMode) -> u8 {
    match mode {
        LedMode::RedOnly => SLOT_RED,
        LedMode::RedIr | LedMode::MultiLed => SLOT_RED | (SLOT_IR << 4),
    }
}

/// Number of channels packed into each FIFO sample for a slot layout.
fn slot_channels(slots: u8) -> usize {
    usize::from(slots & 0x0F != 0) + usize::from(slots >> 4 != 0)
}

fn decode_sample(bytes: &[u8]) -> u32 {
    ((u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2])) & SAMPLE_MASK
}

/// A MAX30102 on an I2C bus.
///
/// Bus speed is a property of the `I2C` implementation and has to be chosen
/// when the bus is constructed.
#[derive(Debug)]
pub struct Max30102<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    led_mode: LedMode,
}

impl<I2C, D> Max30102<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Max30102 {
            i2c,
            delay,
            address,
            led_mode: SensorConfig::TIMESTAMPED.led_mode,
        }
    }

    /// Gives the bus and delay back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn part_id(&mut self) -> Result<u8, DriverError<I2C::Error>> {
        self.read_register(Register::PartId)
    }

    pub fn revision_id(&mut self) -> Result<u8, DriverError<I2C::Error>> {
        self.read_register(Register::RevisionId)
    }

    /// Fails unless the device identifies itself as a MAX30102.
    pub fn check_part_id(&mut self) -> Result<(), DriverError<I2C::Error>> {
        match self.part_id()? {
            EXPECTED_PART_ID => Ok(()),
            other => Err(DriverError::WrongPartId(other)),
        }
    }

    /// Sets the reset bit and waits for the device to clear it.
    pub fn soft_reset(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.write_register(Register::ModeConfig, MODE_RESET)?;
        let mut waited = Duration::ZERO;
        while waited < RESET_TIMEOUT {
            if self.read_register(Register::ModeConfig)? & MODE_RESET == 0 {
                return Ok(());
            }
            self.delay.delay_us(RESET_POLL_DELAY.as_micros() as u32);
            waited += RESET_POLL_DELAY;
        }
        Err(DriverError::ResetTimeout)
    }

    /// Enters power-save mode. Register contents are kept.
    pub fn shutdown(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.write_register(Register::ModeConfig, MODE_SHUTDOWN | mode_bits(self.led_mode))
    }

    pub fn wake_up(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.write_register(Register::ModeConfig, mode_bits(self.led_mode))
    }

    /// Resets the FIFO pointers and overflow counter.
    pub fn clear_fifo(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.write_register(Register::FifoWritePointer, 0)?;
        self.write_register(Register::OverflowCounter, 0)?;
        self.write_register(Register::FifoReadPointer, 0)
    }

    /// Drains the FIFO and returns the most recent IR reading.
    ///
    /// Returns `WouldBlock` while the FIFO is empty. Each sample holds one
    /// channel per enabled slot, Red first. In Red-only mode no IR channel is
    /// sampled and the result is `0`.
    pub fn try_read_ir(&mut self) -> nb::Result<u32, DriverError<I2C::Error>> {
        let write_ptr = self
            .read_register(Register::FifoWritePointer)
            .map_err(nb::Error::Other)?;
        let read_ptr = self
            .read_register(Register::FifoReadPointer)
            .map_err(nb::Error::Other)?;

        let available = write_ptr.wrapping_sub(read_ptr) & FIFO_POINTER_MASK;
        if available == 0 {
            return Err(nb::Error::WouldBlock);
        }

        let channels = slot_channels(slot_bits(self.led_mode));
        let sample_len = CHANNEL_LEN * channels;
        let mut buf = [0u8; MAX_SAMPLE_LEN];
        let mut latest = 0;
        for _ in 0..available {
            self.i2c
                .write_read(self.address, &[Register::FifoData as u8], &mut buf[..sample_len])
                .map_err(|e| nb::Error::Other(DriverError::I2c(e)))?;
            if channels == 2 {
                latest = decode_sample(&buf[CHANNEL_LEN..MAX_SAMPLE_LEN]);
            }
        }
        Ok(latest)
    }

    fn read_register(&mut self, reg: Register) -> Result<u8, DriverError<I2C::Error>> {
        let mut value = [0u8];
        self.i2c.write_read(self.address, &[reg as u8], &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<(), DriverError<I2C::Error>> {
        self.i2c.write(self.address, &[reg as u8, value])?;
        Ok(())
    }
}

impl<I2C, D> IrSensor for Max30102<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = DriverError<I2C::Error>;

    fn probe(&mut self, speed: BusSpeed) -> bool {
        debug!("probing MAX30102 at {:#04x} ({} Hz bus)", self.address, speed.hz());
        match self.check_part_id() {
            Ok(()) => true,
            Err(e) => {
                debug!("probe failed: {:?}", e);
                false
            }
        }
    }

    fn configure(&mut self, config: &SensorConfig) -> Result<(), Self::Error> {
        self.soft_reset()?;

        self.write_register(Register::FifoConfig, fifo_config_bits(config.sample_average))?;
        self.write_register(Register::ModeConfig, mode_bits(config.led_mode))?;
        self.led_mode = config.led_mode;
        self.write_register(
            Register::Spo2Config,
            spo2_config_bits(config.adc_range, config.sample_rate, config.pulse_width),
        )?;
        self.write_register(Register::Led1PulseAmplitude, config.led_brightness)?;
        self.write_register(Register::Led2PulseAmplitude, config.led_brightness)?;
        self.write_register(Register::MultiLedControl1, slot_bits(config.led_mode))?;
        self.clear_fifo()?;

        debug!(
            "MAX30102 configured: avg={} mode={:?} rate={}Hz pw={}us range={}nA",
            config.sample_average.count(),
            config.led_mode,
            config.sample_rate.hz(),
            config.pulse_width.micros(),
            config.adc_range.nanoamps()
        );
        Ok(())
    }

    fn set_channel_current(&mut self, channel: Channel, level: u8) -> Result<(), Self::Error> {
        let reg = match channel {
            Channel::Red => Register::Led1PulseAmplitude,
            Channel::Ir => Register::Led2PulseAmplitude,
        };
        self.write_register(reg, level)
    }

    fn read_ir(&mut self) -> u32 {
        let mut waited = Duration::ZERO;
        loop {
            match self.try_read_ir() {
                Ok(ir) => return ir,
                Err(nb::Error::WouldBlock) if waited < READ_TIMEOUT => {
                    self.delay.delay_us(READ_POLL_DELAY.as_micros() as u32);
                    waited += READ_POLL_DELAY;
                }
                Err(nb::Error::WouldBlock) => {
                    warn!("no MAX30102 sample within {:?}", READ_TIMEOUT);
                    return 0;
                }
                Err(nb::Error::Other(e)) => {
                    warn!("MAX30102 read failed: {:?}", e);
                    return 0;
                }
            }
        }
    }
}

// tests/common/mod.rs

#![allow(dead_code)]

#[cfg(feature = "max30102")]
mod register_bus;

#[cfg(feature = "max30102")]
pub use register_bus::{BusError, NoopDelay, RegisterBus};

use max30102_stream::common::{BusSpeed, Channel, Clock, IrSensor, SensorConfig};
use std::collections::VecDeque;
use std::vec::Vec;

// --- Scripted sensor ---

#[derive(Debug, Default)]
pub struct ScriptedSensor {
    pub present: bool,
    pub readings: VecDeque<u32>,
    pub reads: usize,
    pub calls: Vec<&'static str>,
}

impl ScriptedSensor {
    pub fn with_readings(readings: &[u32]) -> Self {
        ScriptedSensor {
            present: true,
            readings: readings.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn absent() -> Self {
        ScriptedSensor::default()
    }
}

impl IrSensor for ScriptedSensor {
    type Error = ();

    fn probe(&mut self, _speed: BusSpeed) -> bool {
        self.calls.push("probe");
        self.present
    }

    fn configure(&mut self, _config: &SensorConfig) -> Result<(), ()> {
        self.calls.push("configure");
        Ok(())
    }

    fn set_channel_current(&mut self, _channel: Channel, _level: u8) -> Result<(), ()> {
        self.calls.push("set_channel_current");
        Ok(())
    }

    fn read_ir(&mut self) -> u32 {
        self.calls.push("read_ir");
        self.reads += 1;
        self.readings.pop_front().unwrap_or(0)
    }
}

// --- Scripted clock ---

#[derive(Debug, Default)]
pub struct ScriptedClock {
    pub times: VecDeque<u32>,
    pub last: u32,
}

impl ScriptedClock {
    pub fn new(times: &[u32]) -> Self {
        ScriptedClock {
            times: times.iter().copied().collect(),
            last: 0,
        }
    }
}

impl Clock for ScriptedClock {
    fn now_ms(&mut self) -> u32 {
        if let Some(t) = self.times.pop_front() {
            self.last = t;
        }
        self.last
    }
}

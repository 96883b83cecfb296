// tests/common/register_bus.rs

//! Driver-level fakes. Only built with the `max30102` feature.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use std::collections::VecDeque;

// --- MAX30102 register file on a mock I2C bus ---

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BusError;

impl embedded_hal::i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(embedded_hal::i2c::NoAcknowledgeSource::Address)
    }
}

pub struct RegisterBus {
    pub registers: [u8; 256],
    pub connected: bool,
    /// Readings the device produces, one per FIFO pointer check.
    /// Survives soft reset, unlike the FIFO itself.
    pub incoming: VecDeque<u32>,
    pointer: u8,
    fifo: VecDeque<[u8; 6]>,
}

impl RegisterBus {
    pub fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[0xFF] = 0x15;
        RegisterBus {
            registers,
            connected: true,
            incoming: VecDeque::new(),
            pointer: 0,
            fifo: VecDeque::new(),
        }
    }

    pub fn disconnected() -> Self {
        RegisterBus { connected: false, ..Self::new() }
    }

    pub fn producing(readings: &[u32]) -> Self {
        RegisterBus {
            incoming: readings.iter().copied().collect(),
            ..Self::new()
        }
    }

    pub fn push_ir(&mut self, ir: u32) {
        self.fifo.push_back([0, 0, 0, (ir >> 16) as u8, (ir >> 8) as u8, ir as u8]);
        self.registers[0x04] = self.registers[0x04].wrapping_add(1) & 0x1F;
    }
}

impl ErrorType for RegisterBus {
    type Error = BusError;
}

impl I2c for RegisterBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), BusError> {
        if !self.connected || address != 0x57 {
            return Err(BusError);
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((reg, data)) = bytes.split_first() {
                        self.pointer = *reg;
                        for (i, value) in data.iter().enumerate() {
                            let reg = reg.wrapping_add(i as u8);
                            if reg == 0x09 && value & 0x40 != 0 {
                                // soft reset: everything but the id registers
                                let part = self.registers[0xFF];
                                self.registers = [0; 256];
                                self.registers[0xFF] = part;
                                self.fifo.clear();
                            } else {
                                self.registers[reg as usize] = *value;
                            }
                        }
                    }
                }
                Operation::Read(buf) => {
                    if self.pointer == 0x04 {
                        if let Some(ir) = self.incoming.pop_front() {
                            self.push_ir(ir);
                        }
                    }
                    if self.pointer == 0x07 {
                        let sample = self.fifo.pop_front().unwrap_or([0; 6]);
                        buf.copy_from_slice(&sample[..buf.len()]);
                        self.registers[0x06] = self.registers[0x06].wrapping_add(1) & 0x1F;
                    } else {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.registers[self.pointer.wrapping_add(i as u8) as usize];
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

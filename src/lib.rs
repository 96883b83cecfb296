// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(feature = "std")]
extern crate std;

pub mod acquisition;
pub mod common;
#[cfg(feature = "max30102")]
pub mod driver;
pub mod stream;

// Re-export key types for convenience
pub use acquisition::{Acquisition, EmitThrottle, Halted};
pub use common::{AcquisitionConfig, InitError, IrSensor, Sample, SensorConfig};
#[cfg(feature = "max30102")]
pub use driver::Max30102;

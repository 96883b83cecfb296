// src/driver/mod.rs

// Concrete implementations of the sensor capability.
pub mod max30102;

pub use max30102::{Max30102, DEFAULT_ADDRESS, EXPECTED_PART_ID};

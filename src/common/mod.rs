// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

// From config.rs
pub use config::{
    AcquisitionConfig, AdcRange, Channel, EmitMode, LedMode, PulseWidth, SampleAverage,
    SampleRate, SensorConfig,
};

// From error.rs
pub use error::{ConfigError, DriverError, InitError};

// From hal_traits.rs
pub use hal_traits::{Clock, IrSensor};

// From timing.rs (constants stay under common::timing::*)
pub use timing::BusSpeed;

// From types.rs
pub use types::Sample;

// --- Feature-gated re-exports ---

// Host adapters (from hal_traits.rs)
#[cfg(feature = "std")]
pub use hal_traits::{IoSink, StdClock};

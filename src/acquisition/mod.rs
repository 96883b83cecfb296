// src/acquisition/mod.rs

//! The acquisition loop: configure once, then poll and emit forever.

pub mod throttle;

pub use throttle::{emit_if_due, EmitThrottle};

use crate::common::{
    config::{AcquisitionConfig, Channel, EmitMode, SensorConfig},
    error::InitError,
    hal_traits::{Clock, IrSensor},
    timing::BusSpeed,
    types::Sample,
};
use crate::stream::{encode_diagnostic, encode_line};
use core::fmt::{self, Write};
use log::{error, info, trace, warn};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Emitter {
    Throttled(EmitThrottle),
    EveryPoll,
}

impl From<EmitMode> for Emitter {
    fn from(mode: EmitMode) -> Self {
        match mode {
            EmitMode::Throttled { interval_ms } => Emitter::Throttled(EmitThrottle::new(interval_ms)),
            EmitMode::EveryPoll => Emitter::EveryPoll,
        }
    }
}

/// A configured sensor streaming IR readings to a text sink.
///
/// The only way to obtain one is [`Acquisition::initialize`], so a sample can
/// never be taken from an unconfigured sensor.
pub struct Acquisition<S, C, W> {
    sensor: S,
    clock: C,
    sink: W,
    config: AcquisitionConfig,
    emitter: Emitter,
}

/// Terminal state after a failed initialization.
///
/// The diagnostic line has already been written. The parts are handed back
/// so the caller can decide how to stay down (exit, sleep, blink an LED).
pub struct Halted<S: IrSensor, C, W> {
    error: InitError<S::Error>,
    sensor: S,
    clock: C,
    sink: W,
}

impl<S: IrSensor, C, W> Halted<S, C, W> {
    pub fn error(&self) -> &InitError<S::Error> {
        &self.error
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_parts(self) -> (InitError<S::Error>, S, C, W) {
        (self.error, self.sensor, self.clock, self.sink)
    }
}

impl<S: IrSensor, C, W> fmt::Debug for Halted<S, C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Halted").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<S, C, W> Acquisition<S, C, W>
where
    S: IrSensor,
    C: Clock,
    W: Write,
{
    /// Probes the sensor at 400 kHz and applies `config`.
    ///
    /// After the general setup the Red drive current is forced to
    /// `config.sensor.red_current` and the IR current to
    /// `config.sensor.ir_current`. On failure a single diagnostic line is
    /// written to `sink` and the loop is returned as [`Halted`]; there is no
    /// retry.
    pub fn initialize(
        mut sensor: S,
        clock: C,
        mut sink: W,
        config: AcquisitionConfig,
    ) -> Result<Self, Halted<S, C, W>> {
        match bring_up(&mut sensor, &config.sensor) {
            Ok(()) => {
                info!(
                    "MAX30102 ready: {:?}, averaging {}",
                    config.emit,
                    config.sensor.sample_average.count()
                );
                Ok(Acquisition {
                    sensor,
                    clock,
                    sink,
                    config,
                    emitter: config.emit.into(),
                })
            }
            Err(error) => {
                error!("acquisition halted: {}", error);
                let written =
                    encode_diagnostic(error.diagnostic()).and_then(|line| sink.write_str(&line));
                if written.is_err() {
                    warn!("could not write diagnostic line");
                }
                Err(Halted { error, sensor, clock, sink })
            }
        }
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// The throttle state, if this loop throttles.
    pub fn throttle(&self) -> Option<&EmitThrottle> {
        match &self.emitter {
            Emitter::Throttled(t) => Some(t),
            Emitter::EveryPoll => None,
        }
    }

    /// Reads the current IR intensity.
    ///
    /// The sample carries a timestamp only in the throttled mode. May block
    /// for as long as the sensor takes to answer.
    pub fn poll_once(&mut self) -> Sample {
        let ir = self.sensor.read_ir();
        match self.emitter {
            Emitter::Throttled(_) => Sample::at(self.clock.now_ms(), ir),
            Emitter::EveryPoll => Sample::untimed(ir),
        }
    }

    /// Writes `sample` if the emission policy allows it.
    ///
    /// Throttled: `ts,ir` once per interval, using the sample's own
    /// timestamp (or the clock, for an untimed sample). Every poll: a bare
    /// `ir` line, always.
    pub fn emit_if_due(&mut self, sample: &Sample) -> Result<bool, fmt::Error> {
        let emitted = match &mut self.emitter {
            Emitter::Throttled(throttle) => {
                let now = match sample.timestamp_ms {
                    Some(ts) => ts,
                    None => self.clock.now_ms(),
                };
                throttle.emit_if_due(&mut self.sink, sample, now)?
            }
            Emitter::EveryPoll => {
                self.sink.write_str(&encode_line(&Sample::untimed(sample.ir)))?;
                true
            }
        };
        if emitted {
            trace!("emitted {:?}", sample);
        }
        Ok(emitted)
    }

    /// One loop iteration. Returns whether a line was emitted.
    ///
    /// A rejected write is logged and dropped, like a serial port with no
    /// listener.
    pub fn step(&mut self) -> bool {
        let sample = self.poll_once();
        match self.emit_if_due(&sample) {
            Ok(emitted) => emitted,
            Err(_) => {
                warn!("output stream rejected a line");
                false
            }
        }
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Initializes and runs forever. Returns only if initialization failed.
    pub fn launch(sensor: S, clock: C, sink: W, config: AcquisitionConfig) -> Halted<S, C, W> {
        match Self::initialize(sensor, clock, sink, config) {
            Ok(mut acquisition) => acquisition.run(),
            Err(halted) => halted,
        }
    }

    pub fn into_parts(self) -> (S, C, W) {
        (self.sensor, self.clock, self.sink)
    }
}

fn bring_up<S: IrSensor>(sensor: &mut S, config: &SensorConfig) -> Result<(), InitError<S::Error>> {
    if !sensor.probe(BusSpeed::Fast) {
        return Err(InitError::SensorAbsent);
    }
    sensor.configure(config).map_err(InitError::Bus)?;
    sensor
        .set_channel_current(Channel::Red, config.red_current)
        .map_err(InitError::Bus)?;
    sensor
        .set_channel_current(Channel::Ir, config.ir_current)
        .map_err(InitError::Bus)?;
    Ok(())
}

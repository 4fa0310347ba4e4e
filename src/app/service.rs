//! Servo controller: the closed loop.
//!
//! [`ServoController`] owns the pipeline stages and the board handles.
//! Events flow out through an [`EventSink`] injected at call sites, so the
//! whole loop runs on the host against mock pins, delays and ADCs.
//!
//! ```text
//!  AnalogInput ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                  │      ServoController        │
//!  OutputPin   ◀── │ sample · map · emit         │ ──▶ WatchdogPort
//!                  └─────────────────────────────┘
//! ```
//!
//! Each cycle is strictly sequential and blocking: channel settle, averaged
//! sample, range map, one PWM frame.  A cycle takes roughly
//! `sample_reads * sample_settle_ms + refresh_interval_us` (~31 ms).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::config::ServoConfig;
use crate::control::centering::{ActuatorInitializer, CenteringReport};
use crate::control::mapping::{MappedAngle, RangeMapper};
use crate::control::pulse::{Frame, PulseEmitter};
use crate::drivers::servo_bank::ServoBank;
use crate::error::{ActuatorError, Error, Result};
use crate::sensors::analog::{AnalogSampler, RawSample};

use super::events::{AppEvent, TelemetryData};
use super::ports::{AnalogInput, EventSink, WatchdogPort};

/// Record of one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub raw: RawSample,
    pub angle: MappedAngle,
    pub frame: Frame,
}

pub struct ServoController<A, P, D, W> {
    config: ServoConfig,
    sampler: AnalogSampler<A>,
    mapper: RangeMapper,
    emitter: PulseEmitter,
    initializer: ActuatorInitializer,
    bank: ServoBank<P>,
    delay: D,
    watchdog: W,
    cycle: u64,
    failed_cycles: u64,
}

impl<A, P, D, W> ServoController<A, P, D, W>
where
    A: AnalogInput,
    P: OutputPin,
    D: DelayNs,
    W: WatchdogPort,
{
    /// Validate `config` against the attached bank and assemble the loop.
    pub fn new(
        config: ServoConfig,
        adc: A,
        bank: ServoBank<P>,
        delay: D,
        watchdog: W,
    ) -> Result<Self> {
        config.validate()?;
        if Some(config.servo_pin) > bank.last_id() {
            return Err(Error::Config("servo_pin not attached to bank"));
        }

        Ok(Self {
            sampler: AnalogSampler::new(adc, &config),
            mapper: RangeMapper::new(),
            emitter: PulseEmitter::new(&config),
            initializer: ActuatorInitializer::new(&config),
            bank,
            delay,
            watchdog,
            config,
            cycle: 0,
            failed_cycles: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Center the configured pin range, then announce the loop.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<CenteringReport> {
        let report = self.initializer.init(
            self.config.init_pin_range_end,
            &mut self.bank,
            &self.emitter,
            &mut self.delay,
            &mut self.watchdog,
        )?;
        sink.emit(&AppEvent::Centered {
            pins: report.pins,
            frames: report.frames,
        });

        info!("ServoController started on pin {}", self.config.servo_pin);
        sink.emit(&AppEvent::Started {
            servo_pin: self.config.servo_pin,
        });
        Ok(report)
    }

    /// Run the closed loop forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            self.tick(sink);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One cycle with bookkeeping: feeds the watchdog, emits telemetry on
    /// schedule, and turns a failed cycle into an event instead of stopping.
    pub fn tick(&mut self, sink: &mut impl EventSink) -> Option<Cycle> {
        self.cycle += 1;

        let outcome = match self.step() {
            Ok(cycle) => {
                let every = u64::from(self.config.telemetry_interval_cycles);
                if every > 0 && self.cycle % every == 0 {
                    sink.emit(&AppEvent::Telemetry(TelemetryData {
                        cycle: self.cycle,
                        raw: cycle.raw,
                        angle: cycle.angle,
                        frame: cycle.frame,
                        failed_cycles: self.failed_cycles,
                    }));
                }
                Some(cycle)
            }
            Err(e) => {
                self.failed_cycles += 1;
                warn!("cycle {} failed: {}", self.cycle, e);
                if let Err(release) = self.bank.all_low() {
                    warn!("could not release servo outputs: {}", release);
                }
                sink.emit(&AppEvent::CycleFailed(e));
                None
            }
        };

        self.watchdog.feed();
        outcome
    }

    /// Sample, map, emit.  No bookkeeping.
    pub fn step(&mut self) -> Result<Cycle> {
        let c = &self.config;

        self.delay.delay_us(c.channel_settle_us);
        let raw = self.sampler.sample(&mut self.delay)?;

        let angle = self
            .mapper
            .map(i32::from(raw), c.sensor_min, c.sensor_max, c.angle_min, c.angle_max);
        let bounds = self
            .mapper
            .last_bounds()
            .ok_or(ActuatorError::BoundsNotSet)?;

        let pin = self.bank.pin_mut(c.servo_pin)?;
        let frame = self.emitter.emit(pin, &mut self.delay, angle, bounds)?;

        Ok(Cycle { raw, angle, frame })
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }
}

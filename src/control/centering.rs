//! Startup centering.
//!
//! Before the closed loop reads any live sensor data, every servo in the
//! configured range is held at the neutral pulse for a fixed number of
//! frames so it physically settles at ~90° instead of jumping from
//! whatever the floating pin did at power-on.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info};

use crate::app::ports::WatchdogPort;
use crate::config::ServoConfig;
use crate::control::pulse::PulseEmitter;
use crate::drivers::servo_bank::ServoBank;
use crate::error::{ActuatorError, Result};
use crate::pins::PIN_CONTROL_MIN;

/// Outcome of a centering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenteringReport {
    pub pins: u32,
    pub frames: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ActuatorInitializer {
    settle_ms: u32,
    frames_per_pin: u32,
    neutral_us: u32,
}

impl ActuatorInitializer {
    pub fn new(config: &ServoConfig) -> Self {
        Self {
            settle_ms: config.init_settle_ms,
            frames_per_pin: config.init_frames_per_pin,
            neutral_us: config.default_pulse_us,
        }
    }

    /// Settle, then center pins `PIN_CONTROL_MIN..=pin_range_end` one after
    /// the other.
    ///
    /// An end below `PIN_CONTROL_MIN` centers nothing; only the settle
    /// delay runs.  An end past the last attached pin fails before any
    /// frame is emitted.
    pub fn init<P, D, W>(
        &self,
        pin_range_end: u8,
        bank: &mut ServoBank<P>,
        emitter: &PulseEmitter,
        delay: &mut D,
        watchdog: &mut W,
    ) -> Result<CenteringReport>
    where
        P: OutputPin,
        D: DelayNs,
        W: WatchdogPort,
    {
        if pin_range_end >= PIN_CONTROL_MIN && Some(pin_range_end) > bank.last_id() {
            return Err(ActuatorError::UnknownPin(pin_range_end).into());
        }

        info!(
            "centering: settle {}ms, pins {}..={} at {}us",
            self.settle_ms, PIN_CONTROL_MIN, pin_range_end, self.neutral_us
        );
        delay.delay_ms(self.settle_ms);

        let mut report = CenteringReport { pins: 0, frames: 0 };
        for id in PIN_CONTROL_MIN..=pin_range_end {
            let pin = bank.pin_mut(id)?;
            for _ in 0..self.frames_per_pin {
                emitter.emit_width(pin, delay, self.neutral_us)?;
            }
            watchdog.feed();
            report.pins += 1;
            report.frames += self.frames_per_pin;
            debug!("centering: pin {} done", id);
        }

        info!("centering: {} pins, {} frames", report.pins, report.frames);
        Ok(report)
    }
}

//! Software PWM: one servo frame per call.
//!
//! A frame drives the pin high for the pulse width, then low for the rest
//! of the refresh period, so every frame blocks for exactly
//! `refresh_interval_us` whatever the duty cycle.  There is no timer or
//! interrupt behind it; the delay primitive is the only clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::trace;

use crate::config::ServoConfig;
use crate::control::mapping::AngleBounds;
use crate::error::{ActuatorError, Result};

/// Pulse width in microseconds.
pub type PulseWidthMicros = u32;

/// High and low halves of one emitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub high_us: u32,
    pub low_us: u32,
}

impl Frame {
    pub const fn period_us(&self) -> u32 {
        self.high_us + self.low_us
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseEmitter {
    refresh_us: u32,
    min_pulse_us: u32,
    max_pulse_us: u32,
}

impl PulseEmitter {
    pub fn new(config: &ServoConfig) -> Self {
        Self {
            refresh_us: config.refresh_interval_us,
            min_pulse_us: config.min_pulse_us,
            max_pulse_us: config.max_pulse_us,
        }
    }

    /// Rescale `angle` from `bounds` into the pulse range.
    ///
    /// Not clamped: an angle outside `bounds` gives a width outside
    /// `[min_pulse_us, max_pulse_us]`.  Negative results truncate to 0.
    pub fn pulse_width(&self, angle: i32, bounds: AngleBounds) -> PulseWidthMicros {
        let per_degree =
            (self.max_pulse_us - self.min_pulse_us) as f32 / (bounds.max - bounds.min) as f32;
        (self.min_pulse_us as f32 + per_degree * (angle - bounds.min) as f32) as PulseWidthMicros
    }

    /// Emit one frame positioning the servo on `pin` at `angle`.
    pub fn emit<P, D>(
        &self,
        pin: &mut P,
        delay: &mut D,
        angle: i32,
        bounds: AngleBounds,
    ) -> Result<Frame>
    where
        P: OutputPin,
        D: DelayNs,
    {
        let width = self.pulse_width(angle, bounds);
        self.emit_width(pin, delay, width)
    }

    /// Emit one frame with a fixed high time.
    ///
    /// Fails before touching the pin if `width_us` leaves no room for the
    /// low half of the frame.
    pub fn emit_width<P, D>(&self, pin: &mut P, delay: &mut D, width_us: u32) -> Result<Frame>
    where
        P: OutputPin,
        D: DelayNs,
    {
        let low_us = self
            .refresh_us
            .checked_sub(width_us)
            .ok_or(ActuatorError::PulseExceedsFrame {
                width_us,
                period_us: self.refresh_us,
            })?;

        pin.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
        delay.delay_us(width_us);
        pin.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        delay.delay_us(low_us);

        trace!("frame: high={}us low={}us", width_us, low_us);
        Ok(Frame {
            high_us: width_us,
            low_us,
        })
    }
}

//! System configuration parameters
//!
//! All timing and range parameters of the servo pipeline.  Values are fixed
//! at build time: [`ServoConfig::default`] assembles them from the constants
//! below, [`ServoConfig::validate`] checks them once at boot, and nothing
//! mutates the config afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

// --- Frame timing ---
/// Total duration of one PWM frame (50 Hz).
pub const REFRESH_INTERVAL_US: u32 = 20_000;
/// Pulse width for 180°.
pub const MAX_PULSE_WIDTH_US: u32 = 2_350;
/// Pulse width for 90° (neutral).
pub const DEFAULT_PULSE_WIDTH_US: u32 = 1_500;
/// Pulse width for 0°.
pub const MIN_PULSE_WIDTH_US: u32 = 535;

// --- Startup centering ---
pub const INIT_SETTLE_MS: u32 = 2_000;
pub const INIT_FRAMES_PER_PIN: u32 = 150;

// --- Sampling ---
pub const SAMPLE_READS: u32 = 11;
pub const SAMPLE_DIVISOR: u32 = 10;
pub const SAMPLE_SETTLE_MS: u32 = 1;
pub const CHANNEL_SETTLE_US: u32 = 20;

// --- Mapping ---
pub const SENSOR_MIN: i32 = 511;
pub const SENSOR_MAX: i32 = 1023;
pub const ANGLE_MIN: i32 = 0;
pub const ANGLE_MAX: i32 = 180;

/// Core servo configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoConfig {
    // --- Pulse timing ---
    /// Length of one PWM frame (µs)
    pub refresh_interval_us: u32,
    /// Pulse width at the lowest angle (µs)
    pub min_pulse_us: u32,
    /// Pulse width at the highest angle (µs)
    pub max_pulse_us: u32,
    /// Neutral pulse width used while centering (µs)
    pub default_pulse_us: u32,

    // --- Startup centering ---
    /// Wait before the first centering frame (ms)
    pub init_settle_ms: u32,
    /// Neutral frames emitted on each pin
    pub init_frames_per_pin: u32,
    /// Last pin id centered at boot (inclusive)
    pub init_pin_range_end: u8,

    // --- Sampling ---
    /// Raw ADC reads per sample
    pub sample_reads: u32,
    /// Divisor applied to the summed reads
    pub sample_divisor: u32,
    /// Wait after each raw read (ms)
    pub sample_settle_ms: u32,
    /// Wait after selecting the ADC channel, before sampling (µs)
    pub channel_settle_us: u32,

    // --- Mapping ---
    pub sensor_min: i32,
    pub sensor_max: i32,
    pub angle_min: i32,
    pub angle_max: i32,

    // --- Loop ---
    /// Pin id driven by the closed loop
    pub servo_pin: u8,
    /// Control cycles between telemetry events (0 disables telemetry)
    pub telemetry_interval_cycles: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            refresh_interval_us: REFRESH_INTERVAL_US,
            min_pulse_us: MIN_PULSE_WIDTH_US,
            max_pulse_us: MAX_PULSE_WIDTH_US,
            default_pulse_us: DEFAULT_PULSE_WIDTH_US,

            init_settle_ms: INIT_SETTLE_MS,
            init_frames_per_pin: INIT_FRAMES_PER_PIN,
            init_pin_range_end: pins::THUMB_SERVO_PIN,

            sample_reads: SAMPLE_READS,
            sample_divisor: SAMPLE_DIVISOR,
            sample_settle_ms: SAMPLE_SETTLE_MS,
            channel_settle_us: CHANNEL_SETTLE_US,

            sensor_min: SENSOR_MIN,
            sensor_max: SENSOR_MAX,
            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,

            servo_pin: pins::THUMB_SERVO_PIN,
            telemetry_interval_cycles: 50, // ~1.5 s at ~31 ms per cycle
        }
    }
}

impl ServoConfig {
    /// Check every invariant the pipeline relies on.
    ///
    /// Run once at boot.  The mapper divides by the sensor span and the
    /// emitter by the angle span, and the low half of a frame is
    /// `refresh - width`; none of those are re-checked per cycle.
    pub fn validate(&self) -> Result<()> {
        if self.sensor_min >= self.sensor_max {
            return Err(Error::Config("sensor_min must be below sensor_max"));
        }
        if self.angle_min >= self.angle_max {
            return Err(Error::Config("angle_min must be below angle_max"));
        }
        if self.min_pulse_us > self.max_pulse_us {
            return Err(Error::Config("min_pulse_us exceeds max_pulse_us"));
        }
        if !(self.min_pulse_us..=self.max_pulse_us).contains(&self.default_pulse_us) {
            return Err(Error::Config("default_pulse_us outside pulse range"));
        }
        if self.max_pulse_us > self.refresh_interval_us {
            return Err(Error::Config("max_pulse_us exceeds refresh interval"));
        }
        if self.sample_reads == 0 {
            return Err(Error::Config("sample_reads must be non-zero"));
        }
        if self.sample_divisor == 0 {
            return Err(Error::Config("sample_divisor must be non-zero"));
        }
        if !(pins::PIN_CONTROL_MIN..=pins::PIN_CONTROL_MAX).contains(&self.servo_pin) {
            return Err(Error::Config("servo_pin outside control range"));
        }
        if self.init_pin_range_end > pins::PIN_CONTROL_MAX {
            return Err(Error::Config("init_pin_range_end beyond servo bank"));
        }
        Ok(())
    }
}

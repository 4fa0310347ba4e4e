//! Outbound application events.
//!
//! The [`ServoController`](super::service::ServoController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them.

use crate::control::pulse::Frame;
use crate::error::Error;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Startup centering finished.
    Centered { pins: u32, frames: u32 },

    /// The closed loop is about to start on `servo_pin`.
    Started { servo_pin: u8 },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// A control cycle failed; the loop carries on with the next one.
    CycleFailed(Error),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub cycle: u64,
    pub raw: u16,
    pub angle: i32,
    pub frame: Frame,
    pub failed_cycles: u64,
}

//! Port traits: the boundary between the control pipeline and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ServoController (domain)
//! ```
//!
//! GPIO and delays already have standard seams in `embedded-hal` 1.0
//! ([`OutputPin`](embedded_hal::digital::OutputPin) and
//! [`DelayNs`](embedded_hal::delay::DelayNs)); the domain consumes those
//! directly.  The traits here cover what `embedded-hal` 1.0 does not:
//! one-shot ADC reads, structured events and the watchdog.

// ───────────────────────────────────────────────────────────────
// Analog input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

use crate::error::SensorError;

/// One-shot analog conversion on a fixed, pre-selected channel.
pub trait AnalogInput {
    /// Return one raw conversion, bounded by the sampler resolution.
    ///
    /// A failed conversion is an error, never a zero reading.
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Watchdog port
// ───────────────────────────────────────────────────────────────

/// Liveness signal for a hardware or task watchdog.
///
/// The controller feeds it once per control cycle and once per pin while
/// centering, so no single feed interval exceeds a few seconds.
pub trait WatchdogPort {
    fn feed(&mut self);
}

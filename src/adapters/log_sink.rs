//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | cycle={} | raw={} | angle={}\u{00b0} | pulse={}us/{}us | failed={}",
                    t.cycle,
                    t.raw,
                    t.angle,
                    t.frame.high_us,
                    t.frame.period_us(),
                    t.failed_cycles,
                );
            }
            AppEvent::Centered { pins, frames } => {
                info!("CENTER | pins={} frames={}", pins, frames);
            }
            AppEvent::Started { servo_pin } => {
                info!("START | servo_pin={}", servo_pin);
            }
            AppEvent::CycleFailed(e) => {
                warn!("CYCLE | failed: {}", e);
            }
        }
    }
}

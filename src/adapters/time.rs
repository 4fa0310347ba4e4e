//! Blocking delay adapter.
//!
//! The delay is the only clock the software PWM has, so it must be
//! precise at the microsecond scale and must always run to completion.
//! There is no cancellation and no timeout.
//!
//! - **`target_os = "espidf"`** - busy-waits on the ROM `ets_delay_us`
//!   for anything under [`YIELD_THRESHOLD_MS`]; longer waits (the boot
//!   settle) block the task through FreeRTOS so the idle task still runs.
//! - **`not(target_os = "espidf")`** - `std::thread::sleep` for host-side
//!   simulation.

use embedded_hal::delay::DelayNs;

/// Millisecond waits at or above this length yield to the scheduler.
pub const YIELD_THRESHOLD_MS: u32 = 100;

/// Delay provider for the arm controller board.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoardDelay;

impl BoardDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for BoardDelay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_hal::delay::Ets::delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        if ms >= YIELD_THRESHOLD_MS {
            esp_idf_hal::delay::FreeRtos::delay_ms(ms);
        } else {
            esp_idf_hal::delay::Ets::delay_ms(ms);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for BoardDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

//! Replicant Firmware - Main Entry Point
//!
//! Power-on runs the centering sequence once, then the closed loop forever.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioOutput      ThumbSensor     BoardDelay     Watchdog     │
//! │  (OutputPin)     (AnalogInput)   (DelayNs)      (Watchdog)   │
//! │  LogEventSink                                                │
//! │  (EventSink)                                                 │
//! │                                                              │
//! │  ─────────────── Port / embedded-hal boundary ────────────   │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │             ServoController (pure logic)               │  │
//! │  │  AnalogSampler · RangeMapper · PulseEmitter            │  │
//! │  │  ActuatorInitializer                                   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use replicant::adapters::hardware::{GpioOutput, ThumbSensor};
use replicant::adapters::log_sink::LogEventSink;
use replicant::adapters::time::BoardDelay;
use replicant::app::service::ServoController;
use replicant::config::ServoConfig;
use replicant::drivers::hw_init;
use replicant::drivers::servo_bank::ServoBank;
use replicant::drivers::watchdog::Watchdog;
use replicant::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Replicant v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (build-time constants, checked once) ─
    let config = ServoConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    let servo_gpios = [pins::THUMB_SERVO_GPIO];
    hw_init::init_peripherals(&servo_gpios)?;

    let bank = ServoBank::from_pins(servo_gpios.iter().map(|&gpio| GpioOutput::new(gpio)))?;
    let sensor = ThumbSensor::new(hw_init::ADC1_CH_THUMB);
    let watchdog = Watchdog::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut controller = ServoController::new(config, sensor, bank, BoardDelay::new(), watchdog)?;

    // ── 5. Center every servo, then close the loop ────────────
    controller.start(&mut sink)?;
    info!("System ready. Entering control loop.");
    controller.run(&mut sink)
}

//! Servo output bank, hardware initialisation, and watchdog.

pub mod hw_init;
pub mod servo_bank;
pub mod watchdog;

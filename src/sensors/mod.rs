//! Sensor subsystem.
//!
//! The arm reads a single flex sensor per finger; only the thumb is wired
//! to the closed loop today.

pub mod analog;

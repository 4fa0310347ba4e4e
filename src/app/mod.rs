//! Application core: the control loop, free of board specifics.
//!
//! The [`service::ServoController`] wires sampling, mapping and pulse
//! emission together.  Everything it touches on the board comes in
//! through `embedded-hal` traits or the **port traits** in [`ports`], so the
//! loop is fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;

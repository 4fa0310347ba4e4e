//! Signal path: range mapping, PWM frames and startup centering.

pub mod centering;
pub mod mapping;
pub mod pulse;

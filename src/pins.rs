//! Servo pin ids and peripheral assignments for the arm controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.
//!
//! Servo outputs are addressed by a logical id.  Ids start at
//! [`PIN_CONTROL_MIN`] and cover one 8-bit output port, so id 48 is the
//! first bit of the port and id 55 the last.

// ---------------------------------------------------------------------------
// Servo output bank
// ---------------------------------------------------------------------------

/// First servo pin id of the control range.
pub const PIN_CONTROL_MIN: u8 = 48;
/// Number of servo outputs one bank can hold (one 8-bit port).
pub const MAX_BANK_PINS: usize = 8;
/// Last servo pin id a full bank can address.
pub const PIN_CONTROL_MAX: u8 = PIN_CONTROL_MIN + MAX_BANK_PINS as u8 - 1;

/// Thumb servo, driven by the closed loop.
pub const THUMB_SERVO_PIN: u8 = 48;

// ---------------------------------------------------------------------------
// ESP32-S3 wiring
// ---------------------------------------------------------------------------

/// GPIO carrying the software PWM signal for the thumb servo.
pub const THUMB_SERVO_GPIO: i32 = 4;

/// Native ADC width on the target; samples are reduced to 10 bits.
pub const ADC_NATIVE_BITS: u32 = 12;
/// Resolution the sensor mapping range is expressed in.
pub const ADC_SAMPLE_BITS: u32 = 10;

//! Hardware adapters: bridge board peripherals to the traits the
//! controller consumes.
//!
//! [`GpioOutput`] puts a raw GPIO behind `embedded-hal`'s `OutputPin`;
//! [`ThumbSensor`] puts the flex-sensor ADC channel behind
//! [`AnalogInput`].  These are the only types in the system that touch
//! register helpers.  On non-espidf targets the helpers in `hw_init` are
//! simulation stubs.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::app::ports::AnalogInput;
use crate::drivers::hw_init;
use crate::error::SensorError;
use crate::pins;

/// A GPIO configured as a push-pull output by `hw_init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

/// Thumb flex sensor on ADC1.
///
/// The ESP32-S3 converts at 12 bits; readings are shifted down to the
/// 10-bit scale the sensor range (511..=1023) is calibrated in.
#[derive(Debug, Clone, Copy)]
pub struct ThumbSensor {
    channel: u32,
    shift: u32,
}

impl ThumbSensor {
    pub const fn new(channel: u32) -> Self {
        Self {
            channel,
            shift: pins::ADC_NATIVE_BITS - pins::ADC_SAMPLE_BITS,
        }
    }
}

impl AnalogInput for ThumbSensor {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        Ok(hw_init::adc1_read(self.channel)? >> self.shift)
    }
}

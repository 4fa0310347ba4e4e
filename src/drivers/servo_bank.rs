//! Servo output bank.
//!
//! Owns the digital outputs of up to [`MAX_BANK_PINS`] servos and resolves
//! logical pin ids (starting at [`PIN_CONTROL_MIN`]) to them.  Slot 0 is pin
//! id 48, slot 1 is 49, and so on.  The bank is a dumb container: frame
//! timing lives in [`PulseEmitter`](crate::control::pulse::PulseEmitter).

use embedded_hal::digital::OutputPin;
use heapless::Vec;
use log::info;

use crate::error::{ActuatorError, Error, Result};
use crate::pins::{MAX_BANK_PINS, PIN_CONTROL_MIN};

pub struct ServoBank<P> {
    pins: Vec<P, MAX_BANK_PINS>,
}

impl<P: OutputPin> ServoBank<P> {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Attach the next output; it gets id `PIN_CONTROL_MIN + len()`.
    /// Returns the id, or `Error::Init` once the bank is full.
    pub fn attach(&mut self, pin: P) -> Result<u8> {
        let id = self.next_id();
        self.pins
            .push(pin)
            .map_err(|_| Error::Init("servo bank full"))?;
        info!("servo bank: pin {} attached", id);
        Ok(id)
    }

    /// Build a bank from outputs listed in id order.
    pub fn from_pins(pins: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut bank = Self::new();
        for pin in pins {
            bank.attach(pin)?;
        }
        Ok(bank)
    }

    pub fn pin_mut(&mut self, id: u8) -> Result<&mut P> {
        id.checked_sub(PIN_CONTROL_MIN)
            .and_then(|slot| self.pins.get_mut(slot as usize))
            .ok_or(ActuatorError::UnknownPin(id).into())
    }

    /// Drive every output low.
    pub fn all_low(&mut self) -> Result<()> {
        for pin in &mut self.pins {
            pin.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Highest attached pin id, if any.
    pub fn last_id(&self) -> Option<u8> {
        self.len().checked_sub(1).map(|i| PIN_CONTROL_MIN + i as u8)
    }

    fn next_id(&self) -> u8 {
        PIN_CONTROL_MIN + self.pins.len() as u8
    }
}

impl<P: OutputPin> Default for ServoBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

//! Averaging sampler for the thumb flex sensor.
//!
//! Each sample is built from `reads` raw conversions with a fixed settle
//! delay after every read.  The sum is divided by `divisor`, not by
//! `reads`.  The shipped configuration takes 11 reads and divides by 10,
//! which keeps the arm's historical calibration: a sensor pinned at full
//! scale (1023) yields 1125, and the mapper clamps it to the top angle.
//!
//! A failed conversion aborts the whole sample.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::app::ports::AnalogInput;
use crate::config::ServoConfig;
use crate::error::Result;

/// Averaged sensor sample.  May exceed the ADC range, see module docs.
pub type RawSample = u16;

pub struct AnalogSampler<A> {
    adc: A,
    reads: u32,
    divisor: u32,
    settle_ms: u32,
}

impl<A: AnalogInput> AnalogSampler<A> {
    pub fn new(adc: A, config: &ServoConfig) -> Self {
        Self {
            adc,
            reads: config.sample_reads,
            divisor: config.sample_divisor,
            settle_ms: config.sample_settle_ms,
        }
    }

    /// Take one averaged sample.  Blocks for `reads * settle_ms`.
    pub fn sample(&mut self, delay: &mut impl DelayNs) -> Result<RawSample> {
        let mut sum: u32 = 0;
        for _ in 0..self.reads {
            sum += u32::from(self.adc.read_raw()?);
            delay.delay_ms(self.settle_ms);
        }
        let avg = sum / self.divisor;
        trace!("sampler: sum={} avg={}", sum, avg);
        Ok(avg.min(u32::from(u16::MAX)) as RawSample)
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

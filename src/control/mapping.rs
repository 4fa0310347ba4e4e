//! Linear range remapping with saturation.
//!
//! [`RangeMapper::map`] rescales a sensor value into an angle range and
//! records that angle range as the active [`AngleBounds`].  The pulse
//! emitter needs those bounds to turn the angle back into a pulse width, so
//! the control loop reads them from the mapper after each call and hands
//! them to the emitter.
//!
//! Arithmetic runs in `f32` and is truncated to an integer exactly once at
//! the end, matching the calibration the arm was tuned against.

use log::trace;

/// Angle produced by a mapping call, within the output bounds.
pub type MappedAngle = i32;

/// Output half of the active mapping: the angle range the emitter scales
/// pulse widths against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleBounds {
    pub min: i32,
    pub max: i32,
}

/// Full 4-tuple of a linear transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingBounds {
    pub in_min: i32,
    pub in_max: i32,
    pub out_min: i32,
    pub out_max: i32,
}

impl MappingBounds {
    pub const fn output(&self) -> AngleBounds {
        AngleBounds {
            min: self.out_min,
            max: self.out_max,
        }
    }
}

/// Pure form of the transform: clamp, then interpolate.
///
/// When the input span is wider than the output span both spans are
/// widened by one before dividing, which spreads the truncation evenly so
/// the top output value is reachable without saturating early.
///
/// Spans are taken in `i64`, so any ordered pair of `i32` bounds is safe.
pub fn scale(value: i32, b: &MappingBounds) -> MappedAngle {
    if value < b.in_min {
        return b.out_min;
    }
    if value > b.in_max {
        return b.out_max;
    }

    let in_span = i64::from(b.in_max) - i64::from(b.in_min);
    let out_span = i64::from(b.out_max) - i64::from(b.out_min);
    let offset = (i64::from(value) - i64::from(b.in_min)) as f32;

    let scaled = if in_span > out_span {
        offset * (out_span + 1) as f32 / (in_span + 1) as f32
    } else {
        offset * out_span as f32 / in_span as f32
    };

    // f32 rounding near the i32 limits can land a step past the output range.
    let angle = (scaled + b.out_min as f32) as i64;
    let (lo, hi) = (b.out_min.min(b.out_max), b.out_min.max(b.out_max));
    angle.clamp(i64::from(lo), i64::from(hi)) as MappedAngle
}

/// Stateful mapper that remembers the output bounds of its last call.
#[derive(Debug, Default)]
pub struct RangeMapper {
    last: Option<AngleBounds>,
}

impl RangeMapper {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Map `value` from `[in_min, in_max]` into `[out_min, out_max]`,
    /// clamping out-of-range input, and record the output bounds.
    pub fn map(
        &mut self,
        value: i32,
        in_min: i32,
        in_max: i32,
        out_min: i32,
        out_max: i32,
    ) -> MappedAngle {
        let bounds = MappingBounds {
            in_min,
            in_max,
            out_min,
            out_max,
        };
        self.last = Some(bounds.output());
        let angle = scale(value, &bounds);
        trace!("map: {} -> {}", value, angle);
        angle
    }

    /// Output bounds recorded by the most recent [`map`](Self::map) call.
    pub fn last_bounds(&self) -> Option<AngleBounds> {
        self.last
    }
}

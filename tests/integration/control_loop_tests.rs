//! Integration tests for the closed loop: sample → map → emit.

use std::rc::Rc;

use replicant::app::events::AppEvent;
use replicant::app::service::{Cycle, ServoController};
use replicant::config::ServoConfig;
use replicant::control::pulse::Frame;
use replicant::drivers::servo_bank::ServoBank;
use replicant::error::{ActuatorError, Error, SensorError};

use crate::mock_hw::{
    CountingWatchdog, HwOp, MockAdc, MockDelay, MockPin, RecordingSink, Timeline, frames, rig,
};

#[test]
fn one_cycle_has_exact_ordering() {
    // 11 reads of 700 -> 7700 / 10 = 770
    // (770 - 511) * 181 / 513 = 91.38 -> 91°
    // 535 + 1815 / 180 * 91 = 1452.58 -> 1452us
    let (mut ctl, timeline) = rig(ServoConfig::default(), 1, vec![700]);

    let cycle = ctl.step().unwrap();
    assert_eq!(
        cycle,
        Cycle {
            raw: 770,
            angle: 91,
            frame: Frame {
                high_us: 1452,
                low_us: 18_548
            }
        }
    );

    let mut expected = vec![HwOp::DelayUs(20)];
    for _ in 0..11 {
        expected.push(HwOp::AdcRead(700));
        expected.push(HwOp::DelayMs(1));
    }
    expected.extend([
        HwOp::High(48),
        HwOp::DelayUs(1452),
        HwOp::Low(48),
        HwOp::DelayUs(18_548),
    ]);
    assert_eq!(*timeline.borrow(), expected);
}

#[test]
fn sensor_below_range_parks_at_minimum_pulse() {
    let (mut ctl, _timeline) = rig(ServoConfig::default(), 1, vec![0]);
    let cycle = ctl.step().unwrap();
    assert_eq!(cycle.raw, 0);
    assert_eq!(cycle.angle, 0);
    assert_eq!(cycle.frame, Frame { high_us: 535, low_us: 19_465 });
}

#[test]
fn full_scale_sensor_clamps_to_top_angle() {
    let (mut ctl, _timeline) = rig(ServoConfig::default(), 1, vec![1023]);
    let cycle = ctl.step().unwrap();
    assert_eq!(cycle.raw, 1125);
    assert_eq!(cycle.angle, 180);
    assert!((2349..=2350).contains(&cycle.frame.high_us));
    assert_eq!(cycle.frame.period_us(), 20_000);
}

#[test]
fn every_frame_fills_the_refresh_period() {
    let sweep: Vec<u16> = (0..=1023).step_by(7).collect();
    let (mut ctl, timeline) = rig(ServoConfig::default(), 1, sweep);
    let mut sink = RecordingSink::default();

    for _ in 0..60 {
        assert!(ctl.tick(&mut sink).is_some());
    }

    let fs = frames(&timeline);
    assert_eq!(fs.len(), 60);
    for f in fs {
        assert_eq!(f.high_us + f.low_us, 20_000);
        assert!((535..=2350).contains(&f.high_us));
    }
}

#[test]
fn rising_sensor_never_reverses_servo() {
    let mut last = i32::MIN;
    for level in (400..=1023).step_by(13) {
        let (mut ctl, _timeline) = rig(ServoConfig::default(), 1, vec![level]);
        let angle = ctl.step().unwrap().angle;
        assert!(angle >= last, "angle fell from {last} to {angle} at {level}");
        last = angle;
    }
}

#[test]
fn telemetry_on_configured_interval() {
    let config = ServoConfig {
        telemetry_interval_cycles: 3,
        ..ServoConfig::default()
    };
    let (mut ctl, _timeline) = rig(config, 1, vec![800]);
    let mut sink = RecordingSink::default();

    for _ in 0..7 {
        ctl.tick(&mut sink);
    }

    let cycles: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.cycle),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![3, 6]);
    assert_eq!(ctl.cycles(), 7);
    assert_eq!(ctl.watchdog().feeds, 7);
}

#[test]
fn zero_interval_disables_telemetry() {
    let config = ServoConfig {
        telemetry_interval_cycles: 0,
        ..ServoConfig::default()
    };
    let (mut ctl, _timeline) = rig(config, 1, vec![800]);
    let mut sink = RecordingSink::default();
    for _ in 0..5 {
        ctl.tick(&mut sink);
    }
    assert!(sink.events.is_empty());
}

fn failing_rig() -> (ServoController<MockAdc, MockPin, MockDelay, CountingWatchdog>, Timeline) {
    let timeline: Timeline = Rc::default();
    let bank = ServoBank::from_pins([MockPin::failing(48, &timeline)]).unwrap();
    let ctl = ServoController::new(
        ServoConfig::default(),
        MockAdc::new(vec![800], &timeline),
        bank,
        MockDelay::new(&timeline),
        CountingWatchdog::default(),
    )
    .unwrap();
    (ctl, timeline)
}

#[test]
fn failed_cycle_is_reported_and_loop_continues() {
    let (mut ctl, timeline) = failing_rig();
    let mut sink = RecordingSink::default();

    assert_eq!(ctl.tick(&mut sink), None);
    assert_eq!(ctl.tick(&mut sink), None);

    assert_eq!(ctl.failed_cycles(), 2);
    assert_eq!(ctl.watchdog().feeds, 2);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CycleFailed(Error::Actuator(ActuatorError::GpioWriteFailed)),
            AppEvent::CycleFailed(Error::Actuator(ActuatorError::GpioWriteFailed)),
        ]
    );
    // Outputs are released after the failure.
    assert_eq!(timeline.borrow().last(), Some(&HwOp::Low(48)));
}

#[test]
fn adc_fault_fails_the_cycle_without_a_pulse() {
    // One good sample (11 reads), then the converter dies.
    let timeline: Timeline = Rc::default();
    let bank = ServoBank::from_pins([MockPin::new(48, &timeline)]).unwrap();
    let mut ctl = ServoController::new(
        ServoConfig::default(),
        MockAdc::failing_from(vec![800], 11, &timeline),
        bank,
        MockDelay::new(&timeline),
        CountingWatchdog::default(),
    )
    .unwrap();
    let mut sink = RecordingSink::default();

    assert!(ctl.tick(&mut sink).is_some());
    timeline.borrow_mut().clear();

    assert_eq!(ctl.tick(&mut sink), None);
    assert_eq!(ctl.tick(&mut sink), None);

    assert_eq!(ctl.failed_cycles(), 2);
    assert_eq!(ctl.watchdog().feeds, 3);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CycleFailed(Error::Sensor(SensorError::AdcReadFailed)),
            AppEvent::CycleFailed(Error::Sensor(SensorError::AdcReadFailed)),
        ]
    );
    // No pulse goes out on a failed sample; outputs are only released.
    assert!(!timeline.borrow().iter().any(|op| matches!(op, HwOp::High(_))));
    assert!(frames(&timeline).is_empty());
    assert_eq!(timeline.borrow().last(), Some(&HwOp::Low(48)));
}

#[test]
fn servo_pin_must_be_attached() {
    let timeline: Timeline = Rc::default();
    let config = ServoConfig {
        servo_pin: 49,
        ..ServoConfig::default()
    };
    let bank = ServoBank::from_pins([MockPin::new(48, &timeline)]).unwrap();
    let result = ServoController::new(
        config,
        MockAdc::new(vec![0], &timeline),
        bank,
        MockDelay::new(&timeline),
        CountingWatchdog::default(),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn invalid_config_rejected_at_construction() {
    let timeline: Timeline = Rc::default();
    let config = ServoConfig {
        angle_min: 180,
        angle_max: 0,
        ..ServoConfig::default()
    };
    let bank = ServoBank::from_pins([MockPin::new(48, &timeline)]).unwrap();
    let result = ServoController::new(
        config,
        MockAdc::new(vec![0], &timeline),
        bank,
        MockDelay::new(&timeline),
        CountingWatchdog::default(),
    );
    assert_eq!(
        result.err(),
        Some(Error::Config("angle_min must be below angle_max"))
    );
}

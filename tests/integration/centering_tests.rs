//! Integration tests for startup centering.

use replicant::app::events::AppEvent;
use replicant::config::ServoConfig;
use replicant::control::centering::CenteringReport;
use replicant::error::{ActuatorError, Error};

use crate::mock_hw::{HwOp, PwmFrame, RecordingSink, frames, rig};

fn config_with_range_end(end: u8) -> ServoConfig {
    ServoConfig {
        init_pin_range_end: end,
        ..ServoConfig::default()
    }
}

#[test]
fn default_boot_centers_thumb_for_150_frames() {
    let (mut ctl, timeline) = rig(ServoConfig::default(), 1, vec![0]);
    let mut sink = RecordingSink::default();

    let report = ctl.start(&mut sink).unwrap();
    assert_eq!(report, CenteringReport { pins: 1, frames: 150 });

    let fs = frames(&timeline);
    assert_eq!(fs.len(), 150);
    assert!(fs.iter().all(|f| *f
        == PwmFrame {
            pin: 48,
            high_us: 1500,
            low_us: 18_500
        }));
}

#[test]
fn settle_delay_precedes_first_frame() {
    let (mut ctl, timeline) = rig(ServoConfig::default(), 1, vec![0]);
    ctl.start(&mut RecordingSink::default()).unwrap();

    let ops = timeline.borrow();
    assert_eq!(ops[0], HwOp::DelayMs(2000));
    assert_eq!(ops[1], HwOp::High(48));
    // Every op is either the settle, a pin edge or a frame wait.
    assert_eq!(ops.len(), 1 + 150 * 4);
}

#[test]
fn range_covers_every_pin_in_order() {
    let (mut ctl, timeline) = rig(config_with_range_end(50), 3, vec![0]);
    let report = ctl.start(&mut RecordingSink::default()).unwrap();

    assert_eq!(report, CenteringReport { pins: 3, frames: 450 });
    let fs = frames(&timeline);
    assert_eq!(fs.len(), 450);
    for (i, pin) in [48u8, 49, 50].into_iter().enumerate() {
        let chunk = &fs[i * 150..(i + 1) * 150];
        assert!(chunk.iter().all(|f| f.pin == pin), "pin {pin} out of order");
    }
    assert!(fs.iter().all(|f| f.high_us + f.low_us == 20_000));
}

#[test]
fn watchdog_fed_once_per_centered_pin() {
    let (mut ctl, _timeline) = rig(config_with_range_end(51), 4, vec![0]);
    ctl.start(&mut RecordingSink::default()).unwrap();
    assert_eq!(ctl.watchdog().feeds, 4);
}

#[test]
fn range_end_below_control_min_only_settles() {
    let (mut ctl, timeline) = rig(config_with_range_end(47), 1, vec![0]);
    let report = ctl.start(&mut RecordingSink::default()).unwrap();

    assert_eq!(report, CenteringReport { pins: 0, frames: 0 });
    assert_eq!(*timeline.borrow(), vec![HwOp::DelayMs(2000)]);
}

#[test]
fn range_end_past_bank_fails_before_any_output() {
    let (mut ctl, timeline) = rig(config_with_range_end(50), 1, vec![0]);
    let mut sink = RecordingSink::default();

    let err = ctl.start(&mut sink).unwrap_err();
    assert_eq!(err, Error::Actuator(ActuatorError::UnknownPin(50)));
    assert!(timeline.borrow().is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn start_announces_centering_then_loop() {
    let (mut ctl, _timeline) = rig(ServoConfig::default(), 1, vec![0]);
    let mut sink = RecordingSink::default();
    ctl.start(&mut sink).unwrap();

    assert_eq!(
        sink.events,
        vec![
            AppEvent::Centered {
                pins: 1,
                frames: 150
            },
            AppEvent::Started { servo_pin: 48 },
        ]
    );
}

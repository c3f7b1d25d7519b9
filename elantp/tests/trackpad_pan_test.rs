pub mod common;

use elantp::frame::{NO_DATA, REPORT_LEN};
use elantp::gesture::TickOutput;

use crate::common::*;

/// One finger moving right by 3 per tick, `frames` ticks long
fn slide(pad: &mut Trackpad, frames: i32) {
    for k in 0..frames {
        pad.tick(&[finger(0, 100 + 3 * k, 300)]);
    }
}

#[test]
fn test_pan_starts_after_settling() {
    let mut pad = Trackpad::new();

    for k in 0..5 {
        pad.tick(&[finger(0, 100 + 3 * k, 300)]);
        assert_eq!(pad.engine().panning_slot(), None, "tick {}", k + 1);
        assert_eq!(pad.engine().output(), TickOutput::default());
    }

    // 6th tick: moving for a while, and down for 5 ticks
    pad.tick(&[finger(0, 115, 300)]);
    assert_eq!(pad.engine().panning_slot(), Some(0));
    assert_eq!(
        pad.engine().output(),
        TickOutput {
            dx: 3,
            dy: 0,
            scroll_x: 0,
            scroll_y: 0
        }
    );

    for k in 6..15 {
        pad.tick(&[finger(0, 100 + 3 * k, 300)]);
        assert_eq!(pad.engine().output().dx, 3);
    }

    // Identical motion is only reported once
    assert_eq!(pad.mouse_reports(), vec![(0, 3, 0, 0, 0)]);
}

#[test]
fn test_pan_stops_on_lift() {
    let mut pad = Trackpad::new();
    slide(&mut pad, 15);
    assert_eq!(pad.engine().panning_slot(), Some(0));

    pad.idle(1);
    assert_eq!(pad.engine().panning_slot(), None);
    assert_eq!(pad.engine().output(), TickOutput::default());
    assert_eq!(pad.mouse_reports(), vec![(0, 3, 0, 0, 0), (0, 0, 0, 0, 0)]);

    // A long contact isn't a tap
    assert!(!pad.engine().tap().is_mouse_down());
    pad.idle(3);
    assert_eq!(pad.mouse_reports().len(), 2);
}

#[test]
fn test_pan_vertical_motion() {
    let mut pad = Trackpad::new();
    for k in 0..10 {
        pad.tick(&[finger(0, 400, 500 - 4 * k)]);
    }
    assert_eq!(pad.engine().output().dx, 0);
    assert_eq!(pad.engine().output().dy, -4);
    assert_eq!(pad.mouse_reports(), vec![(0, 0, -4, 0, 0)]);
}

#[test]
fn test_pan_glitch_is_suppressed() {
    let mut pad = Trackpad::new();
    slide(&mut pad, 8);
    assert_eq!(pad.engine().output().dx, 3);

    // Jump far away in one tick
    pad.tick(&[finger(0, 100 + 3 * 8 + 100, 300)]);
    assert_eq!(pad.engine().panning_slot(), Some(0));
    assert_eq!(pad.engine().output().dx, 0);
    assert_eq!(pad.engine().output().dy, 0);

    pad.tick(&[finger(0, 100 + 3 * 9 + 100, 300)]);
    assert_eq!(pad.engine().output().dx, 3);
    assert_eq!(pad.mouse_reports(), vec![(0, 3, 0, 0, 0), (0, 0, 0, 0, 0), (0, 3, 0, 0, 0)]);
}

#[test]
fn test_resting_finger_does_not_move_pointer() {
    let mut pad = Trackpad::new();
    for _ in 0..20 {
        pad.tick(&[finger(0, 200, 200)]);
    }
    assert_eq!(pad.engine().panning_slot(), None);
    assert!(pad.mouse_reports().is_empty());
}

#[test]
fn test_no_data_report_skips_tick() {
    let mut pad = Trackpad::new();
    slide(&mut pad, 3);
    let tick = pad.engine().slots()[0].tick();

    let mut report = raw_report(&[finger(0, 500, 500)], false);
    report[0] = NO_DATA;
    assert!(!pad.processor.process_report(&report, &mut pad.sink));
    assert_eq!(pad.engine().slots()[0].tick(), tick);
    assert!(pad.sink.0.is_empty());

    let idle = [0u8; REPORT_LEN];
    assert!(pad.processor.process_report(&idle, &mut pad.sink));
    assert!(!pad.engine().slots()[0].is_touching());
}

#[test]
fn test_palm_is_rejected() {
    let mut pad = Trackpad::new();
    let palm = finger(1, 300, 700);

    // The palm rests long before the pointing finger lands above it
    for _ in 0..20 {
        pad.tick(&[palm]);
    }
    for k in 0..5 {
        pad.tick(&[finger(0, 300 + 3 * k, 300), palm]);
        assert!(!pad.engine().slots()[1].is_blacklisted());
    }
    pad.tick(&[finger(0, 315, 300), palm]);
    assert_eq!(pad.engine().panning_slot(), Some(0));
    assert!(pad.engine().slots()[1].is_blacklisted());

    // A rejected palm moving around doesn't turn the pan into a scroll
    for k in 6..12 {
        let moving_palm = finger(1, 300 + 5 * k, 700);
        pad.tick(&[finger(0, 300 + 3 * k, 300), moving_palm]);
        assert_eq!(pad.engine().panning_slot(), Some(0));
        assert_eq!(pad.engine().scrolling_slots(), None);
        assert_eq!(pad.engine().output().dx, 3);
    }

    // Lifting the palm clears the flag
    pad.tick(&[finger(0, 336, 300)]);
    assert!(!pad.engine().slots()[1].is_blacklisted());
    assert_eq!(pad.engine().slots()[1].tick(), 0);
    assert_eq!(pad.engine().slots()[1].true_tick(), 0);
}

#[test]
fn test_late_finger_is_not_a_palm() {
    let mut pad = Trackpad::new();
    slide(&mut pad, 8);
    assert_eq!(pad.engine().panning_slot(), Some(0));

    // Lands below the pointer, but after it
    for k in 8..20 {
        pad.tick(&[finger(0, 100 + 3 * k, 300), finger(1, 200, 700)]);
    }
    assert!(!pad.engine().slots()[1].is_blacklisted());
    assert_eq!(pad.engine().panning_slot(), Some(0));
}

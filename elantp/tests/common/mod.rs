#![allow(dead_code)]

use elantp::frame::REPORT_LEN;
use elantp::gesture::TrackpadProcessor;
use elantp::{Report, ReportSink};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Calibration used by all scenario tests
pub const MAX_Y: i32 = 3000;

/// A finger at output coordinates
#[derive(Debug, Clone, Copy)]
pub struct Finger {
    pub slot: usize,
    pub x: i32,
    pub y: i32,
    pub pressure: u8,
}

pub fn finger(slot: usize, x: i32, y: i32) -> Finger {
    Finger {
        slot,
        x,
        y,
        pressure: 30,
    }
}

/// Encode a raw report whose decoded contacts land exactly on the given
/// output coordinates.
pub fn raw_report(fingers: &[Finger], button: bool) -> [u8; REPORT_LEN] {
    let mut fingers = fingers.to_vec();
    fingers.sort_by_key(|f| f.slot);

    let mut report = [0u8; REPORT_LEN];
    report[3] = button as u8;
    let mut offset = 4;
    for f in fingers {
        // Smallest raw values that scale back to the wanted output
        let raw_x = (7 * f.x + 1) / 2;
        let raw_y = MAX_Y - (7 * f.y + 1) / 2;
        assert!(
            (0..4096).contains(&raw_x) && (0..4096).contains(&raw_y),
            "finger out of range: {:?}",
            f
        );

        report[3] |= 1 << (3 + f.slot);
        report[offset] = (((raw_x >> 4) & 0xf0) | ((raw_y >> 8) & 0x0f)) as u8;
        report[offset + 1] = raw_x as u8;
        report[offset + 2] = raw_y as u8;
        report[offset + 3] = 0x33;
        report[offset + 4] = f.pressure;
        offset += 5;
    }
    report
}

#[derive(Default)]
pub struct Collect(pub Vec<Report>);

impl ReportSink for Collect {
    fn write_report(&mut self, report: Report) {
        self.0.push(report);
    }
}

/// Mouse report as (buttons, x, y, wheel, pan)
pub type Mouse = (u8, i8, i8, i8, i8);
/// Keyboard report as (modifier, keycodes)
pub type Keyboard = (u8, [u8; 6]);

pub struct Trackpad {
    pub processor: TrackpadProcessor,
    pub sink: Collect,
}

impl Trackpad {
    pub fn new() -> Self {
        Self {
            processor: TrackpadProcessor::new(MAX_Y),
            sink: Collect::default(),
        }
    }

    pub fn tick(&mut self, fingers: &[Finger]) {
        self.press(fingers, false);
    }

    pub fn press(&mut self, fingers: &[Finger], button: bool) {
        let report = raw_report(fingers, button);
        assert!(self.processor.process_report(&report, &mut self.sink));
    }

    pub fn idle(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick(&[]);
        }
    }

    pub fn engine(&self) -> &elantp::GestureEngine {
        self.processor.engine()
    }

    pub fn mouse_reports(&self) -> Vec<Mouse> {
        self.sink
            .0
            .iter()
            .filter_map(|r| match r {
                Report::MouseReport(m) => Some((m.buttons, m.x, m.y, m.wheel, m.pan)),
                Report::KeyboardReport(_) => None,
            })
            .collect()
    }

    pub fn keyboard_reports(&self) -> Vec<Keyboard> {
        self.sink
            .0
            .iter()
            .filter_map(|r| match r {
                Report::KeyboardReport(k) => Some((k.modifier, k.keycodes)),
                Report::MouseReport(_) => None,
            })
            .collect()
    }
}

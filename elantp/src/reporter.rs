//! HID reports and the sink they are written to.

use elantp_types::keycode::HidKeyCode;
use elantp_types::modifier::HidModifiers;
use elantp_types::mouse_button::MouseButtons;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use usbd_hid::descriptor::MouseReport;

use crate::descriptor::KeyboardReport;

/// Reports produced by the gesture engine
pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Relative mouse hid report
    MouseReport(MouseReport),
}

/// Destination of the generated reports, e.g. the USB or BLE hid writer.
///
/// Writes are fire-and-forget, the engine never waits for the host.
pub trait ReportSink {
    fn write_report(&mut self, report: Report);
}

impl<M: RawMutex, const N: usize> ReportSink for Sender<'_, M, Report, N> {
    fn write_report(&mut self, report: Report) {
        if self.try_send(report).is_err() {
            warn!("Report channel is full, dropping report");
        }
    }
}

/// Content of a relative mouse report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseState {
    pub buttons: MouseButtons,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseState {
    pub fn new(buttons: MouseButtons, x: i32, y: i32, wheel: i32, pan: i32) -> Self {
        Self {
            buttons,
            x: clamp_i8(x),
            y: clamp_i8(y),
            wheel: clamp_i8(wheel),
            pan: clamp_i8(pan),
        }
    }

    fn to_report(self) -> MouseReport {
        MouseReport {
            buttons: self.buttons.into_bits(),
            x: self.x,
            y: self.y,
            wheel: self.wheel,
            pan: self.pan,
        }
    }
}

fn clamp_i8(value: i32) -> i8 {
    value.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Writes reports to a [`ReportSink`], dropping a mouse report when it's
/// identical to the previous one.
#[derive(Debug, Default)]
pub struct HidReporter {
    last_mouse: MouseState,
}

impl HidReporter {
    pub const fn new() -> Self {
        Self {
            last_mouse: MouseState {
                buttons: MouseButtons::NONE,
                x: 0,
                y: 0,
                wheel: 0,
                pan: 0,
            },
        }
    }

    /// Send a relative mouse report, unless it repeats the last one.
    ///
    /// The last report starts zeroed, so an idle trackpad sends nothing.
    pub fn send_mouse(&mut self, sink: &mut impl ReportSink, state: MouseState) {
        if state == self.last_mouse {
            return;
        }
        self.last_mouse = state;
        sink.write_report(Report::MouseReport(state.to_report()));
    }

    /// Press `key` with `modifiers` and release everything right away.
    pub fn send_chord(&mut self, sink: &mut impl ReportSink, modifiers: HidModifiers, key: HidKeyCode) {
        let mut keycodes = [0; 6];
        keycodes[0] = key.as_u8();
        sink.write_report(Report::KeyboardReport(KeyboardReport {
            modifier: modifiers.into_bits(),
            keycodes,
        }));
        sink.write_report(Report::KeyboardReport(KeyboardReport::default()));
    }
}

//! Click state: physical clickpad presses, tap-to-click and tap-and-drag.
//!
//! A quick tap puts the button down without any finger owning it. If a
//! finger lands within [`TAP_WINDOW`] ticks it takes the drag over, and
//! when that finger lifts the drag ends. A second contact that is itself
//! shorter than [`TAP_WINDOW`] was a second tap, not a drag, and is turned
//! into a double click.

use elantp_types::mouse_button::MouseButtons;

use crate::reporter::{HidReporter, MouseState, ReportSink};

/// Tick window shared by every tap decision
pub const TAP_WINDOW: i32 = 10;

#[derive(Clone, Copy, Debug, Default)]
pub struct TapState {
    /// A button is held, physically or by a tap
    mouse_down: bool,
    /// The held button comes from a tap
    mouse_down_due_to_tap: bool,
    /// Slot dragging with the tapped button, `None` while waiting for a finger
    drag_slot: Option<usize>,
    button_mask: MouseButtons,
    ticks_since_click: i32,
    ticks_since_last_release: i32,
}

impl TapState {
    pub const fn new() -> Self {
        Self {
            mouse_down: false,
            mouse_down_due_to_tap: false,
            drag_slot: None,
            button_mask: MouseButtons::NONE,
            ticks_since_click: 0,
            ticks_since_last_release: 0,
        }
    }

    pub fn button_mask(&self) -> MouseButtons {
        self.button_mask
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    /// A tapped button is held and no finger owns it yet
    pub fn is_drag_pending(&self) -> bool {
        self.mouse_down_due_to_tap && self.drag_slot.is_none()
    }

    pub fn drag_slot(&self) -> Option<usize> {
        self.drag_slot
    }

    /// Follow the physical button. Skipped entirely while a tap holds the button.
    pub(crate) fn physical_click(&mut self, button_down: bool, fingers: u8) {
        if self.mouse_down_due_to_tap {
            return;
        }
        if button_down && !self.mouse_down {
            self.mouse_down = true;
            self.ticks_since_click = 0;
            self.button_mask = MouseButtons::for_finger_count(fingers);
            debug!("Clickpad pressed with {} finger(s)", fingers);
        } else if self.mouse_down && !button_down {
            self.mouse_down = false;
            self.button_mask = MouseButtons::NONE;
            debug!("Clickpad released");
        }
    }

    /// A finger landed on `slot`, let it own a pending tap-drag
    pub(crate) fn associate_drag(&mut self, slot: usize) {
        if self.ticks_since_last_release < TAP_WINDOW && self.is_drag_pending() {
            debug!("Tap-drag taken over by slot {}", slot);
            self.drag_slot = Some(slot);
        }
    }

    /// `slot` is not touching. If it owned the tap-drag, end the drag, or
    /// send a double click if the contact was too short to be a drag.
    pub(crate) fn finish_drag(&mut self, slot: usize, tick: i32, reporter: &mut HidReporter, sink: &mut impl ReportSink) {
        if self.drag_slot != Some(slot) || !self.mouse_down_due_to_tap {
            return;
        }
        if tick < TAP_WINDOW {
            debug!("Second tap on slot {}, double click", slot);
            reporter.send_mouse(sink, MouseState::default());
            reporter.send_mouse(sink, MouseState::new(self.button_mask, 0, 0, 0, 0));
        } else {
            debug!("Tap-drag on slot {} finished", slot);
        }
        self.mouse_down_due_to_tap = false;
        self.mouse_down = false;
        self.button_mask = MouseButtons::NONE;
        self.drag_slot = None;
    }

    /// A finger was lifted during this tick
    pub(crate) fn mark_release(&mut self) {
        self.ticks_since_last_release = -1;
    }

    /// Runs once per tick, after bookkeeping
    pub(crate) fn end_bookkeeping(&mut self) {
        self.ticks_since_last_release = self.ticks_since_last_release.saturating_add(1);
    }

    /// Turn the fingers tapped this tick into a button press.
    ///
    /// `tapped` counts the fingers that lifted this tick after a short,
    /// firm contact.
    pub(crate) fn tap_to_click_or_drag(&mut self, tapped: u8) {
        self.ticks_since_click = self.ticks_since_click.saturating_add(1);
        if self.is_drag_pending() {
            if self.ticks_since_click > TAP_WINDOW {
                debug!("Tap-drag timed out");
                self.mouse_down_due_to_tap = false;
                self.mouse_down = false;
                self.button_mask = MouseButtons::NONE;
            }
            return;
        }
        if self.mouse_down {
            self.ticks_since_click = 0;
            return;
        }
        if tapped == 0 {
            return;
        }

        let buttons = MouseButtons::for_finger_count(tapped);
        if !buttons.is_empty() && self.ticks_since_click > TAP_WINDOW && self.ticks_since_last_release == 0 {
            debug!("Tap with {} finger(s)", tapped);
            self.drag_slot = None;
            self.mouse_down_due_to_tap = true;
            self.button_mask = buttons;
            self.mouse_down = true;
            self.ticks_since_click = 0;
        }
    }
}

//! Gesture engine.
//!
//! One call to [`GestureEngine::process`] is one tick. The tick first works
//! out which fingers are moving, then tries the gestures in priority order
//! (swipe, scroll, pan), updates the click state, folds the frame into the
//! per-finger statistics and finally sends the mouse report.

use elantp_types::keycode::HidKeyCode;
use elantp_types::modifier::HidModifiers;
use heapless::Vec;

use crate::frame::{self, MAX_FINGERS, REPORT_LEN, TouchFrame};
use crate::reporter::{HidReporter, MouseState, ReportSink};
use crate::scroll::scroll_value;
use crate::slot::{SlotUpdate, TouchSlot};
use crate::tap::TapState;

/// Squared speed a finger must exceed to take part in a gesture
const SPEED_THRESHOLD: i32 = 2;
/// A finger is "recently added" during its first ticks
const RECENT_TICKS_THRESHOLD: i32 = 20;
/// Ticks a finger must be down before it starts panning
const PAN_SETTLE_TICKS: i32 = 5;
/// A per-tick pointer jump larger than this is a sensor glitch
const GLITCH_THRESHOLD: i32 = 75;
/// A palm has been resting this many ticks longer than the pointing finger
const PALM_TICKS_THRESHOLD: i32 = 15;
/// Ticks scrolling survives with only one of its fingers
const SCROLL_GRACE_TICKS: i32 = 5;
/// Swipe ticks accumulated before a chord may fire
const SWIPE_MIN_TICKS: i32 = 5;
/// Swipe ticks after which an episode starts over
const SWIPE_MAX_TICKS: i32 = 25;
/// Accumulated distance that fires a swipe
const SWIPE_DISTANCE: i32 = 50;
/// Fingers that are moving, at most three are tracked
const MAX_ACTIVE: usize = 3;

/// State of a three/four-finger swipe episode
#[derive(Clone, Copy, Debug, Default)]
struct Swipe {
    x: i32,
    y: i32,
    ticks: i32,
    /// The chord of this episode was sent
    done: bool,
}

impl Swipe {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Which fingers are moving this tick
struct Census {
    /// Number of moving fingers, may exceed the tracked slots
    active: usize,
    /// Moving fingers in slot order
    slots: Vec<usize, MAX_ACTIVE>,
    recently_added: usize,
    touching: usize,
}

impl Census {
    fn slot(&self, n: usize) -> Option<usize> {
        self.slots.get(n).copied()
    }
}

/// Output accumulated during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    pub dx: i32,
    pub dy: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
}

pub struct GestureEngine {
    slots: [TouchSlot; MAX_FINGERS],
    /// Slot moving the pointer
    panning: Option<usize>,
    /// Slots scrolling
    scrolling: Option<[usize; 2]>,
    ticks_since_scrolling: i32,
    swipe: Swipe,
    tap: TapState,
    button_down: bool,
    output: TickOutput,
    reporter: HidReporter,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub const fn new() -> Self {
        Self {
            slots: [TouchSlot::new(); MAX_FINGERS],
            panning: None,
            scrolling: None,
            ticks_since_scrolling: 0,
            swipe: Swipe {
                x: 0,
                y: 0,
                ticks: 0,
                done: false,
            },
            tap: TapState::new(),
            button_down: false,
            output: TickOutput {
                dx: 0,
                dy: 0,
                scroll_x: 0,
                scroll_y: 0,
            },
            reporter: HidReporter::new(),
        }
    }

    pub fn slots(&self) -> &[TouchSlot; MAX_FINGERS] {
        &self.slots
    }

    pub fn panning_slot(&self) -> Option<usize> {
        self.panning
    }

    pub fn scrolling_slots(&self) -> Option<[usize; 2]> {
        self.scrolling
    }

    pub fn tap(&self) -> &TapState {
        &self.tap
    }

    /// Motion and scroll of the last tick
    pub fn output(&self) -> TickOutput {
        self.output
    }

    /// Run one tick on a decoded frame
    pub fn process(&mut self, frame: &TouchFrame, sink: &mut impl ReportSink) {
        for (slot, contact) in self.slots.iter_mut().zip(frame.contacts) {
            slot.set_contact(contact);
        }
        self.button_down = frame.button;
        self.output = TickOutput::default();

        let census = self.census();

        let handled = self.process_swipe(&census, sink) || self.process_scroll(&census) || self.process_move(&census);
        if !handled {
            trace!("No gesture this tick");
        }

        let fingers = self.button_count(&census);
        self.tap.physical_click(self.button_down, fingers);

        let tapped = self.shift_to_last(sink);
        self.tap.tap_to_click_or_drag(tapped);

        let state = MouseState::new(
            self.tap.button_mask(),
            self.output.dx,
            self.output.dy,
            self.output.scroll_y,
            self.output.scroll_x,
        );
        self.reporter.send_mouse(sink, state);
    }

    fn census(&self) -> Census {
        let mut census = Census {
            active: 0,
            slots: Vec::new(),
            recently_added: 0,
            touching: 0,
        };
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.is_touching() {
                census.touching += 1;
            }
            if slot.recently_added(RECENT_TICKS_THRESHOLD) {
                census.recently_added += 1;
            }
            if slot.speed().is_some_and(|speed| speed > SPEED_THRESHOLD) {
                census.active += 1;
                // Only the first fingers are tracked
                let _ = census.slots.push(i);
            }
        }
        census
    }

    /// Number of fingers that make up a click, 1 to 3
    fn button_count(&self, census: &Census) -> u8 {
        let mut count = census.recently_added;
        if count == 0 {
            count = census.active;
        }
        if count == 0 {
            count = if self.panning.is_some() { 1 } else { census.touching.max(1) };
        }
        count.min(3) as u8
    }

    fn delta(&self, slot: Option<usize>) -> (i32, i32) {
        slot.map_or((0, 0), |i| self.slots[i].delta())
    }

    fn tick_of(&self, slot: Option<usize>) -> i32 {
        slot.map_or(0, |i| self.slots[i].tick())
    }

    fn process_swipe(&mut self, census: &Census, sink: &mut impl ReportSink) -> bool {
        if census.active != 3 && census.active != 4 {
            self.swipe.reset();
            return false;
        }

        let deltas = [
            self.delta(census.slot(0)),
            self.delta(census.slot(1)),
            self.delta(census.slot(2)),
        ];
        let sum_x: i32 = deltas.iter().map(|d| d.0).sum();
        let sum_y: i32 = deltas.iter().map(|d| d.1).sum();
        self.swipe.x += sum_x / 3;
        self.swipe.y += sum_y / 3;
        self.swipe.ticks += 1;

        if self.swipe.ticks > SWIPE_MIN_TICKS && !self.swipe.done {
            let vertical = deltas.iter().map(|d| d.1.abs()).sum::<i32>() > deltas.iter().map(|d| d.0.abs()).sum::<i32>();
            let chord = if vertical {
                (self.swipe.y.abs() > SWIPE_DISTANCE).then(|| {
                    let key = if self.swipe.y < 0 { HidKeyCode::Tab } else { HidKeyCode::D };
                    (HidModifiers::LGUI, key)
                })
            } else {
                (self.swipe.x.abs() > SWIPE_DISTANCE).then(|| {
                    let key = if self.swipe.x > 0 { HidKeyCode::Left } else { HidKeyCode::Right };
                    (HidModifiers::LGUI | HidModifiers::LCTRL, key)
                })
            };
            if let Some((modifiers, key)) = chord {
                debug!("Swipe ({}, {}), sending chord {:?}", self.swipe.x, self.swipe.y, key);
                self.reporter.send_chord(sink, modifiers, key);
                self.swipe.x = 0;
                self.swipe.y = 0;
                self.swipe.done = true;
            }
        } else if self.swipe.ticks > SWIPE_MAX_TICKS {
            self.swipe.reset();
        }
        true
    }

    fn process_scroll(&mut self, census: &Census) -> bool {
        if census.active != 2 && self.scrolling.is_none() {
            return false;
        }

        let mut first = census.slot(0);
        let mut second = census.slot(1);
        if let Some(ids) = self.scrolling {
            // Fill a missing side with a finger from the ongoing scroll
            if first.is_none() {
                first = Some(if second != Some(ids[0]) { ids[0] } else { ids[1] });
            }
            if second.is_none() {
                second = Some(if first != Some(ids[0]) { ids[0] } else { ids[1] });
            }
        }

        let (dx1, dy1) = self.delta(first);
        let (dx2, dy2) = self.delta(second);
        let (mut scroll_x, mut scroll_y) = (0, 0);
        if dy1.abs() + dy2.abs() > dx1.abs() + dx2.abs() {
            scroll_y = -((dy1 + dy2) / 2);
        } else {
            scroll_x = -((dx1 + dx2) / 2);
        }

        let ticks = (self.tick_of(first) + self.tick_of(second)) / 2;
        self.output.scroll_x = scroll_value(scroll_x, ticks);
        self.output.scroll_y = scroll_value(scroll_y, ticks);

        let still_down = self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, slot)| slot.is_touching() && (Some(*i) == first || Some(*i) == second))
            .count();
        if still_down == 2 {
            self.ticks_since_scrolling = 0;
        } else {
            self.ticks_since_scrolling += 1;
        }

        if still_down == 2 || self.ticks_since_scrolling <= SCROLL_GRACE_TICKS {
            if census.active == 2 {
                if let (Some(a), Some(b)) = (census.slot(0), census.slot(1)) {
                    if self.scrolling.is_none() {
                        debug!("Scrolling with slots {} and {}", a, b);
                    }
                    self.scrolling = Some([a, b]);
                }
            }
        } else if self.scrolling.take().is_some() {
            debug!("Scrolling stopped");
        }
        true
    }

    fn process_move(&mut self, census: &Census) -> bool {
        if census.active != 1 && self.panning.is_none() {
            return false;
        }

        let Some(i) = census.slot(0).or(self.panning) else {
            return false;
        };
        if self.panning.is_none() && self.slots[i].tick() < PAN_SETTLE_TICKS {
            return false;
        }

        let (mut dx, mut dy) = self.slots[i].delta();
        if dx.abs() > GLITCH_THRESHOLD || dy.abs() > GLITCH_THRESHOLD {
            dx = 0;
            dy = 0;
        }

        self.reject_palms(i);

        self.output.dx = dx;
        self.output.dy = dy;
        if self.panning != Some(i) {
            debug!("Panning with slot {}", i);
        }
        self.panning = Some(i);
        true
    }

    /// A finger below the pointing finger that has been resting much longer
    /// than it is a palm.
    fn reject_palms(&mut self, pointer: usize) {
        let Some(pointer_contact) = self.slots[pointer].contact() else {
            return;
        };
        let pointer_ticks = self.slots[pointer].true_tick();
        for (j, slot) in self.slots.iter_mut().enumerate() {
            if j == pointer || slot.is_blacklisted() {
                continue;
            }
            let Some(contact) = slot.contact() else {
                continue;
            };
            if contact.y > pointer_contact.y && slot.true_tick() > pointer_ticks + PALM_TICKS_THRESHOLD {
                debug!("Slot {} rejected as palm", j);
                slot.blacklist();
            }
        }
    }

    /// Fold this tick's frame into every slot. Returns the number of fingers
    /// lifted after a tap-like contact.
    fn shift_to_last(&mut self, sink: &mut impl ReportSink) -> u8 {
        let mut tapped = 0;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.just_touched() {
                self.tap.associate_drag(i);
            }
            if !slot.is_touching() {
                self.tap.finish_drag(i, slot.tick(), &mut self.reporter, sink);
            }
            match slot.advance() {
                SlotUpdate::Released { short_press } => {
                    self.tap.mark_release();
                    if short_press {
                        tapped += 1;
                    }
                    if self.panning == Some(i) {
                        self.panning = None;
                    }
                }
                SlotUpdate::Idle => {
                    if self.panning == Some(i) {
                        self.panning = None;
                    }
                }
                SlotUpdate::Touching => {}
            }
        }
        self.tap.end_bookkeeping();
        tapped
    }
}

/// Couples the frame decoder with the gesture engine for one trackpad.
pub struct TrackpadProcessor {
    max_y: i32,
    engine: GestureEngine,
}

impl TrackpadProcessor {
    pub const fn new(max_y: i32) -> Self {
        Self {
            max_y,
            engine: GestureEngine::new(),
        }
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Decode `report` and run one tick on it.
    ///
    /// A "no new data" report is ignored and returns `false`: no tick is run.
    pub fn process_report(&mut self, report: &[u8; REPORT_LEN], sink: &mut impl ReportSink) -> bool {
        match frame::decode(report, self.max_y) {
            Some(frame) => {
                self.engine.process(&frame, sink);
                true
            }
            None => false,
        }
    }
}

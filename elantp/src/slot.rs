//! Per-finger bookkeeping.
//!
//! Every finger slot remembers its previous sample and keeps movement
//! statistics over the life of the contact, the most important one being a
//! sliding sum of the last [`WINDOW`] absolute per-tick deltas, which the
//! gesture engine turns into a speed.

use crate::frame::Contact;

/// Length of the movement history, and the value `tick` settles at
pub const WINDOW: usize = 10;

/// Average pressure a short contact needs to count as a tap
const TAP_PRESSURE_THRESHOLD: i32 = 7;

/// What happened to a slot during [`TouchSlot::advance`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotUpdate {
    /// Not touching, and wasn't touching last tick either
    Idle,
    /// Touching this tick
    Touching,
    /// The contact was lifted this tick. `short_press` is set when the contact
    /// lasted less than [`WINDOW`] ticks and pressed firmly enough to be a tap.
    Released { short_press: bool },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TouchSlot {
    contact: Option<Contact>,
    last: Option<Contact>,
    /// Ticks since touch start, stops at `WINDOW`
    tick: i32,
    /// Ticks since touch start
    true_tick: i32,
    total_x: i32,
    total_y: i32,
    total_p: i32,
    flex_total_x: i32,
    flex_total_y: i32,
    x_history: [i32; WINDOW],
    y_history: [i32; WINDOW],
    blacklisted: bool,
}

impl TouchSlot {
    pub const fn new() -> Self {
        Self {
            contact: None,
            last: None,
            tick: 0,
            true_tick: 0,
            total_x: 0,
            total_y: 0,
            total_p: 0,
            flex_total_x: 0,
            flex_total_y: 0,
            x_history: [0; WINDOW],
            y_history: [0; WINDOW],
            blacklisted: false,
        }
    }

    /// Load this tick's sample
    pub(crate) fn set_contact(&mut self, contact: Option<Contact>) {
        self.contact = contact;
    }

    pub fn contact(&self) -> Option<Contact> {
        self.contact
    }

    pub fn is_touching(&self) -> bool {
        self.contact.is_some()
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    pub fn true_tick(&self) -> i32 {
        self.true_tick
    }

    pub fn flex_total(&self) -> (i32, i32) {
        (self.flex_total_x, self.flex_total_y)
    }

    /// Absolute X and Y deltas recorded in the movement window
    pub fn history(&self) -> (&[i32; WINDOW], &[i32; WINDOW]) {
        (&self.x_history, &self.y_history)
    }

    pub fn is_blacklisted(&self) -> bool {
        self.blacklisted
    }

    pub(crate) fn blacklist(&mut self) {
        if self.is_touching() {
            self.blacklisted = true;
        }
    }

    /// Movement since the previous tick.
    ///
    /// A contact that just landed or just lifted has no delta.
    pub fn delta(&self) -> (i32, i32) {
        match (self.contact, self.last) {
            (Some(now), Some(last)) => (now.x - last.x, now.y - last.y),
            _ => (0, 0),
        }
    }

    /// Squared average speed over the movement window, `None` if the slot has
    /// no window yet or is excluded from gestures.
    pub(crate) fn speed(&self) -> Option<i32> {
        if self.tick == 0 || self.blacklisted {
            return None;
        }
        let distance_sq = self.flex_total_x * self.flex_total_x + self.flex_total_y * self.flex_total_y;
        Some(distance_sq / (self.tick * self.tick))
    }

    /// True during the first ticks of a contact
    pub(crate) fn recently_added(&self, threshold: i32) -> bool {
        self.true_tick != 0 && self.true_tick < threshold
    }

    pub(crate) fn just_touched(&self) -> bool {
        self.contact.is_some() && self.last.is_none()
    }

    /// Fold this tick's sample into the statistics, then make it the previous sample.
    pub(crate) fn advance(&mut self) -> SlotUpdate {
        let update = match self.contact {
            Some(now) => {
                self.true_tick = self.true_tick.saturating_add(1);
                if let Some(last) = self.last {
                    let abs_x = (now.x - last.x).abs();
                    let abs_y = (now.y - last.y).abs();
                    if self.tick < WINDOW as i32 {
                        self.total_x += abs_x;
                        self.total_y += abs_y;
                        self.total_p += now.pressure;

                        self.flex_total_x = self.total_x;
                        self.flex_total_y = self.total_y;

                        let j = self.tick as usize;
                        self.x_history[j] = abs_x;
                        self.y_history[j] = abs_y;
                    } else {
                        self.total_x = self.total_x.saturating_add(abs_x);
                        self.total_y = self.total_y.saturating_add(abs_y);

                        // Drop the oldest entry and append the newest
                        self.flex_total_x += abs_x - self.x_history[0];
                        self.flex_total_y += abs_y - self.y_history[0];
                        self.x_history.copy_within(1.., 0);
                        self.y_history.copy_within(1.., 0);
                        self.x_history[WINDOW - 1] = abs_x;
                        self.y_history[WINDOW - 1] = abs_y;
                    }
                }
                if self.tick < WINDOW as i32 {
                    self.tick += 1;
                }
                SlotUpdate::Touching
            }
            None => {
                let released = self.last.is_some();
                let short_press = self.tick != 0
                    && self.tick < WINDOW as i32
                    && self.total_p / self.tick > TAP_PRESSURE_THRESHOLD;
                self.reset();
                if released {
                    SlotUpdate::Released { short_press }
                } else {
                    SlotUpdate::Idle
                }
            }
        };
        self.last = self.contact;
        update
    }

    fn reset(&mut self) {
        *self = Self {
            contact: self.contact,
            last: self.last,
            ..Self::new()
        };
    }
}

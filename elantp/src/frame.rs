//! Decoder for the raw multi-touch report of Elan I2C trackpads.
//!
//! Report layout, `REPORT_LEN` bytes:
//!
//! | offset | content |
//! | --- | --- |
//! | 0 | `0xFF` when the trackpad has no new data |
//! | 3 | touch info: bit 0 physical button, bits 3..7 contact valid for finger 0..4 |
//! | 4 | finger records, `FINGER_DATA_LEN` bytes each, valid contacts only |
//! | 30 | hover info |
//!
//! A finger record packs a 12-bit X and a 12-bit Y into 3 bytes, then the
//! two 4-bit contact axes and a pressure byte.

use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

/// Size of one raw report
pub const REPORT_LEN: usize = 34;
/// Number of contacts the trackpad tracks
pub const MAX_FINGERS: usize = 5;
/// First byte of a report that carries no new data
pub const NO_DATA: u8 = 0xFF;
pub const MAX_PRESSURE: i32 = 255;

const TOUCH_INFO_OFFSET: usize = 3;
const FINGER_DATA_OFFSET: usize = 4;
const HOVER_INFO_OFFSET: usize = 30;
const FINGER_DATA_LEN: usize = 5;

/// Touch info byte
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
pub struct TouchInfo {
    /// Physical button of the clickpad
    #[bits(1)]
    pub button: bool,
    #[bits(2)]
    _reserved: u8,
    /// One bit per finger slot, set when the slot has a valid contact
    #[bits(5)]
    pub contacts: u8,
}

impl TouchInfo {
    pub fn contact_valid(&self, finger: usize) -> bool {
        self.contacts() & (1 << finger) != 0
    }
}

/// Hover info byte
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
pub struct HoverInfo {
    #[bits(6)]
    _low: u8,
    #[bits(1)]
    pub hover: bool,
    #[bits(1)]
    _high: u8,
}

/// One decoded contact, in output coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contact {
    pub x: i32,
    pub y: i32,
    pub pressure: i32,
    /// Larger of the two contact axes
    pub major: u8,
    /// Smaller of the two contact axes
    pub minor: u8,
}

impl Contact {
    fn decode(data: &[u8], max_y: i32) -> Self {
        let raw_x = (((data[0] & 0xf0) as i32) << 4) | data[1] as i32;
        let raw_y = (((data[0] & 0x0f) as i32) << 8) | data[2] as i32;
        let mk_x = data[3] & 0x0f;
        let mk_y = data[3] >> 4;

        // Flip Y, then scale the sensor grid down to output units
        Self {
            x: raw_x * 2 / 7,
            y: (max_y - raw_y) * 2 / 7,
            pressure: (data[4] as i32).min(MAX_PRESSURE),
            major: mk_x.max(mk_y),
            minor: mk_x.min(mk_y),
        }
    }
}

/// All contacts of one report
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchFrame {
    /// Contact per finger slot, `None` when the slot is not touching
    pub contacts: [Option<Contact>; MAX_FINGERS],
    /// Physical button state
    pub button: bool,
    pub hover: bool,
}

impl TouchFrame {
    pub fn touching(&self) -> usize {
        self.contacts.iter().filter(|c| c.is_some()).count()
    }
}

/// Decode a raw report.
///
/// Returns `None` if the report is the "no new data" sentinel. The caller is
/// expected to keep the last good report and decode that one instead.
pub fn decode(report: &[u8; REPORT_LEN], max_y: i32) -> Option<TouchFrame> {
    if report[0] == NO_DATA {
        return None;
    }

    let touch_info = TouchInfo::from_bits(report[TOUCH_INFO_OFFSET]);
    let hover_info = HoverInfo::from_bits(report[HOVER_INFO_OFFSET]);

    let mut contacts = [None; MAX_FINGERS];
    // Records are packed, invalid slots don't take any bytes
    let mut records = report[FINGER_DATA_OFFSET..].chunks_exact(FINGER_DATA_LEN);
    for (finger, contact) in contacts.iter_mut().enumerate() {
        if !touch_info.contact_valid(finger) {
            continue;
        }
        if let Some(data) = records.next() {
            *contact = Some(Contact::decode(data, max_y));
        }
    }

    Some(TouchFrame {
        contacts,
        button: touch_info.button(),
        hover: hover_info.hover(),
    })
}

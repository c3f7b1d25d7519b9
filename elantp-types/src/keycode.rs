use serde::{Deserialize, Serialize};

/// Key codes defined in the HID usage tables (keyboard page) that the
/// gesture engine sends as part of a chord.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidKeyCode {
    /// `d` and `D`
    D = 0x07,
    /// `Tab`
    Tab = 0x2B,
    /// `RightArrow`
    Right = 0x4F,
    /// `LeftArrow`
    Left = 0x50,
}

impl HidKeyCode {
    /// Usage id as written into a keyboard report.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

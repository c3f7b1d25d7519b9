//! Mouse button mask.
//!
//! The trackpad only ever synthesizes the first three buttons, but the mask
//! is a full HID byte so it can be written into a report unchanged.
use bitfield_struct::bitfield;

/// Mouse buttons
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct MouseButtons {
    #[bits(1)]
    pub left: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(1)]
    pub middle: bool,
    #[bits(5)]
    _reserved: u8,
}

impl MouseButtons {
    pub const NONE: Self = Self::new();
    pub const LEFT: Self = Self::new().with_left(true);
    pub const RIGHT: Self = Self::new().with_right(true);
    pub const MIDDLE: Self = Self::new().with_middle(true);

    /// Button for a click made with `fingers` fingers: one finger is the
    /// left button, two the right button and three the middle button.
    ///
    /// Any other count maps to no button.
    pub const fn for_finger_count(fingers: u8) -> Self {
        match fingers {
            1 => Self::LEFT,
            2 => Self::RIGHT,
            3 => Self::MIDDLE,
            _ => Self::NONE,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_count_mapping() {
        assert_eq!(MouseButtons::for_finger_count(0), MouseButtons::NONE);
        assert_eq!(MouseButtons::for_finger_count(1).into_bits(), 0b001);
        assert_eq!(MouseButtons::for_finger_count(2).into_bits(), 0b010);
        assert_eq!(MouseButtons::for_finger_count(3).into_bits(), 0b100);
        assert!(MouseButtons::for_finger_count(4).is_empty());
    }
}

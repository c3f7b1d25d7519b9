use usbd_hid::descriptor::generator_prelude::*;

/// Input-only keyboard report used for the window-management chords.
///
/// No LED output report: the trackpad never reads host state back, and
/// without boot protocol support the reserved byte is left out as well.
/// Keycodes only cover the keyboard application range.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = KEYBOARD) = {
        (usage_page = KEYBOARD, usage_min = 0xE0, usage_max = 0xE7) = {
            #[packed_bits = 8] #[item_settings(data,variable,absolute)] modifier=input;
        };
        (usage_page = KEYBOARD, usage_min = 0x00, usage_max = 0x65) = {
            #[item_settings(data,array,absolute)] keycodes=input;
        };
    }
)]
#[derive(Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier bits, see `HidModifiers`
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

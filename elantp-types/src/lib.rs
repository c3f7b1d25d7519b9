//! # elantp types
//!
//! Plain HID value types shared by the trackpad driver and whatever writes
//! its reports to the host.
//!
//! - [`mouse_button`] - Mouse button mask carried in relative mouse reports
//! - [`modifier`] - Keyboard modifier byte carried in keyboard reports
//! - [`keycode`] - The HID keycodes the gesture engine emits

#![cfg_attr(not(test), no_std)]

pub mod keycode;
pub mod modifier;
pub mod mouse_button;

//! Gesture engine for Elan I2C trackpads.
//!
//! The trackpad is polled once per tick. Each raw report is decoded by
//! [`frame::decode`] into up to five contacts, then [`gesture::GestureEngine`]
//! turns the contacts into relative pointer motion, two-finger scrolling,
//! three/four-finger window-management chords and tap-to-click/drag. The
//! resulting HID reports go to a [`reporter::ReportSink`].
//!
//! [`input_device::ElanTrackpad`] is the polling adapter that reads reports
//! over I2C and feeds the engine.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod config;
pub mod descriptor;
pub mod frame;
pub mod gesture;
pub mod input_device;
pub mod reporter;
pub mod scroll;
pub mod slot;
pub mod tap;

pub use config::TrackpadConfig;
pub use elantp_types;
pub use embassy_futures;
pub use gesture::{GestureEngine, TrackpadProcessor};
pub use input_device::{ElanTrackpad, Runnable};
pub use reporter::{Report, ReportSink};

/// Raw mutex used by all channels of the driver
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Capacity of [`channel::REPORT_CHANNEL`]
pub const REPORT_CHANNEL_SIZE: usize = 16;

//! Exposed channels which can be used to share data between the trackpad and report writers

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};

use crate::reporter::Report;
use crate::{RawMutex, REPORT_CHANNEL_SIZE};

/// Channel for mouse and keyboard reports from the gesture engine to the hid writer
pub static REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();

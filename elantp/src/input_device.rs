//! Polling input device for Elan I2C trackpads.
//!
//! The trackpad's interrupt line isn't used, the report is read on a fixed
//! tick instead. A tick whose read carries no new data (or fails) runs the
//! gesture engine on the last good report again, so tick-counted gestures
//! keep their pace.

use embassy_time::{Duration, Ticker};
use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::i2c::I2c;

use crate::channel::REPORT_CHANNEL;
use crate::config::TrackpadConfig;
use crate::frame::{NO_DATA, REPORT_LEN};
use crate::gesture::TrackpadProcessor;
use crate::reporter::ReportSink;

/// Errors of the trackpad transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackpadError {
    /// I2C communication error
    I2c(ErrorKind),
}

/// Runnable trait for devices and processors that run forever
pub trait Runnable {
    async fn run(&mut self) -> !;
}

pub struct ElanTrackpad<I2C: I2c> {
    i2c: I2C,
    address: u8,
    poll_interval: Duration,
    /// Last report that carried data
    last_report: [u8; REPORT_LEN],
    processor: TrackpadProcessor,
}

impl<I2C: I2c> ElanTrackpad<I2C> {
    pub fn new(i2c: I2C, config: TrackpadConfig) -> Self {
        Self {
            i2c,
            address: config.i2c_address,
            poll_interval: config.poll_interval,
            last_report: [0; REPORT_LEN],
            processor: TrackpadProcessor::new(config.max_y),
        }
    }

    pub fn processor(&self) -> &TrackpadProcessor {
        &self.processor
    }

    pub fn last_report(&self) -> &[u8; REPORT_LEN] {
        &self.last_report
    }

    /// Read one report. Returns `true` if it carried new data, in which case it
    /// becomes the last good report.
    pub async fn read_report(&mut self) -> Result<bool, TrackpadError> {
        let mut report = [0u8; REPORT_LEN];
        self.i2c
            .read(self.address, &mut report)
            .await
            .map_err(|e| TrackpadError::I2c(e.kind()))?;

        if report[0] == NO_DATA {
            return Ok(false);
        }
        self.last_report = report;
        Ok(true)
    }

    /// One tick: read the trackpad, then run the gesture engine on the last
    /// good report.
    pub async fn poll_once(&mut self, sink: &mut impl ReportSink) {
        match self.read_report().await {
            Ok(true) => {}
            Ok(false) => trace!("No new data, reusing last report"),
            Err(e) => warn!("Read trackpad report error: {:?}, reusing last report", e),
        }
        self.processor.process_report(&self.last_report, sink);
    }
}

impl<I2C: I2c> Runnable for ElanTrackpad<I2C> {
    async fn run(&mut self) -> ! {
        info!("Polling Elan trackpad at {:#x}", self.address);
        let mut sender = REPORT_CHANNEL.sender();
        let mut ticker = Ticker::every(self.poll_interval);
        loop {
            ticker.next().await;
            self.poll_once(&mut sender).await;
        }
    }
}

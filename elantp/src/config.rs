use embassy_time::Duration;

/// Tunable configuration of an Elan trackpad.
#[derive(Clone, Copy, Debug)]
pub struct TrackpadConfig {
    /// Maximum Y coordinate reported by the sensor, used to flip the Y axis
    pub max_y: i32,
    /// 7-bit I2C address of the trackpad
    pub i2c_address: u8,
    /// Interval between two polls, one gesture tick is run per poll
    pub poll_interval: Duration,
}

impl Default for TrackpadConfig {
    fn default() -> Self {
        Self {
            max_y: 1500,
            i2c_address: 0x15,
            poll_interval: Duration::from_millis(10),
        }
    }
}

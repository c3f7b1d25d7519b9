//! Scroll acceleration curve.
//!
//! Coarse and non-linear: slow, short movements scroll by single notches,
//! fast flicks use a smaller step per notch and so scroll further.

/// Movement below this is a dead zone
const ACTION_THRESHOLD: i32 = 3;
/// Movement above this is sensor noise
const INVALID_THRESHOLD: i32 = 120;

/// Turn a raw averaged finger delta into wheel notches.
///
/// `ticks` is how long the fingers have been down, the speed is `|raw| / ticks`.
/// All divisions truncate.
pub fn scroll_value(raw: i32, ticks: i32) -> i32 {
    let abs_value = raw.abs();
    if abs_value > INVALID_THRESHOLD || abs_value < ACTION_THRESHOLD {
        return 0;
    }

    let speed = abs_value / ticks.max(1);
    let step = match speed {
        s if s > 11 => 3,
        s if s > 7 => 4,
        s if s > 4 => 6,
        _ => 7,
    };
    let boost = if abs_value > ACTION_THRESHOLD && abs_value < 2 * step {
        0
    } else {
        1
    };
    raw.signum() * (boost + (abs_value - ACTION_THRESHOLD) / step)
}

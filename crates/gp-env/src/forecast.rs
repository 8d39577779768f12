//! Short-horizon traffic forecast.
//!
//! The historical trend is a pair of Gaussian bumps centred on the morning
//! and evening rush hours:
//!
//! ```text
//! trend(t) = 0.5 · ( exp(-((t - 480) / 60)²) + exp(-((t - 1080) / 60)²) )
//! predicted = 0.7 · current + 0.3 · trend((now + offset) mod 1440)
//! ```

use gp_core::MINUTES_PER_DAY;

pub const MORNING_PEAK: f64 = 480.0;
pub const EVENING_PEAK: f64 = 1_080.0;
pub const PEAK_WIDTH: f64 = 60.0;

/// Weight of the live factor in the blend.
pub const CURRENT_WEIGHT: f64 = 0.7;
pub const TREND_WEIGHT: f64 = 0.3;

/// Historical congestion estimate at minute-of-day `minute`, in `[0, 0.5]`.
pub fn historical_trend(minute: u32) -> f64 {
    let t = (minute % MINUTES_PER_DAY) as f64;
    let bump = |peak: f64| (-((t - peak) / PEAK_WIDTH).powi(2)).exp();
    (bump(MORNING_PEAK) + bump(EVENING_PEAK)) * 0.5
}

/// Blend a live traffic factor with the trend `offset` minutes ahead of `now`.
pub fn predicted_traffic(current: f64, now: u32, offset: u32) -> f64 {
    let t = (now + offset) % MINUTES_PER_DAY;
    current * CURRENT_WEIGHT + historical_trend(t) * TREND_WEIGHT
}

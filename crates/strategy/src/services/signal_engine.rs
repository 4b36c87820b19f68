use std::cmp::Ordering;

use common::models::{Direction, Horizon, PriceSeries, SignalResult, Strength};
use tracing::debug;

use crate::error::SignalError;
use crate::indicators::{relative_strength_index, simple_moving_average};

pub const RSI_PERIOD: usize = 14;
pub const FAST_MA_PERIOD: usize = 5;
pub const SLOW_MA_PERIOD: usize = 14;
pub const MIN_CLOSES: usize = 14;

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

/// RSI bands for signal strength: beyond 25/75 is high, beyond 35/65 is medium.
pub const STRONG_OVERSOLD: f64 = 25.0;
pub const STRONG_OVERBOUGHT: f64 = 75.0;
pub const MILD_OVERSOLD: f64 = 35.0;
pub const MILD_OVERBOUGHT: f64 = 65.0;

/// Relative gap below which two moving averages count as equal.
const MA_TOLERANCE: f64 = 1e-12;

/// Attached to every non-neutral signal.
pub const SIGNAL_HORIZON: Horizon = Horizon {
    min_minutes: 2,
    max_minutes: 5,
};

/// RSI(14), MA5 and MA14 over `prices`, plus the resulting direction.
pub fn compute_signal(symbol: &str, prices: &PriceSeries) -> Result<SignalResult, SignalError> {
    if prices.len() < MIN_CLOSES {
        return Err(SignalError::InsufficientData {
            required: MIN_CLOSES,
            available: prices.len(),
        });
    }
    let closes = prices.closes();
    if let Some(index) = closes.iter().position(|c| !c.is_finite()) {
        return Err(SignalError::NonFinitePrice { index });
    }

    // MIN_CLOSES >= 2, so the RSI is always defined here
    let rsi = relative_strength_index(closes, RSI_PERIOD).unwrap_or(50.0);
    let ma_fast = simple_moving_average(closes, FAST_MA_PERIOD)?;
    let ma_slow = simple_moving_average(closes, SLOW_MA_PERIOD)?;
    for (indicator, value) in [("RSI", rsi), ("MA fast", ma_fast), ("MA slow", ma_slow)] {
        if !value.is_finite() {
            return Err(SignalError::NonFiniteIndicator { indicator });
        }
    }

    let direction = decide_direction(rsi, ma_fast, ma_slow);
    let strength = rate_strength(rsi);
    let last_price = prices.last().unwrap_or_default();

    debug!(
        "{}: RSI={:.2} MA{}={:.5} MA{}={:.5} -> {} ({})",
        symbol, rsi, FAST_MA_PERIOD, ma_fast, SLOW_MA_PERIOD, ma_slow, direction, strength
    );

    Ok(SignalResult {
        symbol: symbol.to_string(),
        rsi,
        ma_fast,
        ma_slow,
        direction,
        strength,
        horizon_minutes: (direction != Direction::Neutral).then_some(SIGNAL_HORIZON),
        last_price,
    })
}

/// Oversold with a short-term upturn is UP, overbought with a downturn is DOWN.
/// Averages within `MA_TOLERANCE` of each other confirm neither.
pub fn decide_direction(rsi: f64, ma_fast: f64, ma_slow: f64) -> Direction {
    let trend = compare_averages(ma_fast, ma_slow);
    if rsi < OVERSOLD && trend == Ordering::Greater {
        Direction::Up
    } else if rsi > OVERBOUGHT && trend == Ordering::Less {
        Direction::Down
    } else {
        Direction::Neutral
    }
}

/// How far the RSI sits in either tail. Independent of the direction.
pub fn rate_strength(rsi: f64) -> Strength {
    if !(STRONG_OVERSOLD..=STRONG_OVERBOUGHT).contains(&rsi) {
        Strength::High
    } else if !(MILD_OVERSOLD..=MILD_OVERBOUGHT).contains(&rsi) {
        Strength::Medium
    } else {
        Strength::Low
    }
}

fn compare_averages(fast: f64, slow: f64) -> Ordering {
    if (fast - slow).abs() <= MA_TOLERANCE * slow.abs().max(1.0) {
        Ordering::Equal
    } else if fast > slow {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

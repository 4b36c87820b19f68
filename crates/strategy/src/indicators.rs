use ta::Next;
use ta::indicators::SimpleMovingAverage;

use crate::error::SignalError;

/// RSI over the last `period` deltas, using plain averages of gains and losses.
/// Uses fewer deltas when the series is shorter than `period + 1`.
/// Returns `None` for fewer than two closes.
pub fn relative_strength_index(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() < 2 || period == 0 {
        return None;
    }
    let start = closes.len().saturating_sub(period + 1);
    let window = &closes[start..];

    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(g, l), delta| {
            if delta > 0.0 {
                (g + delta, l)
            } else {
                (g, l - delta)
            }
        });

    let deltas = (window.len() - 1) as f64;
    let avg_gain = gains / deltas;
    let avg_loss = losses / deltas;

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Mean of the last `period` closes, fed through `ta`'s running SMA.
pub fn simple_moving_average(closes: &[f64], period: usize) -> Result<f64, SignalError> {
    let mut sma =
        SimpleMovingAverage::new(period).map_err(|e| SignalError::Indicator(format!("{e:?}")))?;
    let start = closes.len().saturating_sub(period);
    let mut value = f64::NAN;
    for &close in &closes[start..] {
        value = sma.next(close);
    }
    Ok(value)
}

use chrono::{DateTime, Utc};

use super::signal::{Direction, Horizon, SignalResult, Strength};

/// One row of the signal log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub chat_id: i64,
    pub symbol: String,
    pub direction: Direction,
    pub price: f64,
    pub horizon_minutes: Option<Horizon>,
    pub strength: Strength,
    pub rsi: f64,
    pub ma_fast: f64,
    pub ma_slow: f64,
}

impl LogRecord {
    pub fn from_signal(timestamp: DateTime<Utc>, chat_id: i64, signal: &SignalResult) -> Self {
        Self {
            timestamp,
            chat_id,
            symbol: signal.symbol.clone(),
            direction: signal.direction,
            price: signal.last_price,
            horizon_minutes: signal.horizon_minutes,
            strength: signal.strength,
            rsi: signal.rsi,
            ma_fast: signal.ma_fast,
            ma_slow: signal.ma_slow,
        }
    }
}

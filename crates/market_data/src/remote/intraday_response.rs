use chrono::NaiveDateTime;
use common::models::PriceSeries;
use serde::Deserialize;

use crate::error::MarketDataError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PREVIEW_CHARS: usize = 200;

/// Row of AlphaVantage's `FX_INTRADAY` CSV (`timestamp,open,high,low,close`).
/// Only the columns the signal needs are read.
#[derive(Debug, Deserialize)]
struct IntradayRow {
    timestamp: String,
    close: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntradayBar {
    pub timestamp: NaiveDateTime,
    pub close: f64,
}

impl TryFrom<IntradayRow> for IntradayBar {
    type Error = MarketDataError;

    fn try_from(row: IntradayRow) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(row.timestamp.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| MarketDataError::Timestamp(row.timestamp.clone()))?;
        Ok(Self {
            timestamp,
            close: row.close,
        })
    }
}

/// The API answers errors and quota notices with a JSON object and HTTP 200.
pub fn check_payload(body: &str) -> Result<(), MarketDataError> {
    let trimmed = body.trim();
    let preview = || trimmed.chars().take(PREVIEW_CHARS).collect::<String>();

    if trimmed.contains("Error") {
        return Err(MarketDataError::Rejected(preview()));
    }
    if trimmed.starts_with('{') || trimmed.contains("Note") || trimmed.contains("Information") {
        return Err(MarketDataError::RateLimited(preview()));
    }
    Ok(())
}

/// Parses the CSV body into bars sorted oldest first.
pub fn parse_intraday_csv(body: &str) -> Result<Vec<IntradayBar>, MarketDataError> {
    check_payload(body)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut bars = reader
        .deserialize::<IntradayRow>()
        .map(|row| IntradayBar::try_from(row?))
        .collect::<Result<Vec<_>, _>>()?;

    bars.sort_by_key(|bar| bar.timestamp);
    Ok(bars)
}

pub fn closes(bars: &[IntradayBar]) -> PriceSeries {
    PriceSeries::new(bars.iter().map(|bar| bar.close).collect())
}

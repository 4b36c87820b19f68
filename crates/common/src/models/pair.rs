use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pairs offered in the chat keyboards.
pub const SUPPORTED_PAIRS: &[&str; 6] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "USD/CAD", "AUD/USD",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairParseError {
    #[error("expected BASE/QUOTE, got `{0}`")]
    MissingSeparator(String),
    #[error("`{0}` is not a 3-letter currency code")]
    InvalidCode(String),
}

/// An FX pair such as `EUR/USD`. Codes are stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Result<Self, PairParseError> {
        Ok(Self {
            base: parse_code(base)?,
            quote: parse_code(quote)?,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// `EUR_USD`, safe to embed in callback data.
    pub fn tag(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }

    pub fn supported() -> Vec<CurrencyPair> {
        SUPPORTED_PAIRS
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect()
    }
}

fn parse_code(raw: &str) -> Result<String, PairParseError> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PairParseError::InvalidCode(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}

impl FromStr for CurrencyPair {
    type Err = PairParseError;

    /// Accepts both `EUR/USD` and `EUR_USD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .or_else(|| s.split_once('_'))
            .ok_or_else(|| PairParseError::MissingSeparator(s.to_string()))?;
        Self::new(base, quote)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = PairParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

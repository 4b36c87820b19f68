use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{CurrencyPair, PairParseError};

pub const DEFAULT_PAIR: &str = "EUR/USD";
pub const DEFAULT_LOG_PATH: &str = "signals_log.csv";
pub const DEFAULT_INTERVAL: &str = "1min";
pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} is invalid: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: PairParseError,
    },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub alphavantage_api_key: String,
    pub alphavantage_base_url: String,
    pub default_pair: CurrencyPair,
    pub interval: String,
    pub log_path: PathBuf,
}

impl BotConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));

        let default_pair = value("FX_DEFAULT")
            .unwrap_or_else(|| DEFAULT_PAIR.to_string())
            .parse()
            .map_err(|source| ConfigError::Invalid {
                var: "FX_DEFAULT",
                source,
            })?;

        Ok(Self {
            telegram_token: required("TELEGRAM_BOT_TOKEN")?,
            alphavantage_api_key: required("ALPHAVANTAGE_API_KEY")?,
            alphavantage_base_url: value("ALPHAVANTAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ALPHAVANTAGE_URL.to_string()),
            default_pair,
            interval: value("FX_INTERVAL").unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            log_path: value("SIGNAL_LOG_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let cfg = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", " 123:abc "),
            ("ALPHAVANTAGE_API_KEY", "demo"),
        ]))
        .unwrap();

        assert_eq!(cfg.telegram_token, "123:abc");
        assert_eq!(cfg.default_pair.to_string(), DEFAULT_PAIR);
        assert_eq!(cfg.interval, DEFAULT_INTERVAL);
        assert_eq!(cfg.log_path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(cfg.alphavantage_base_url, DEFAULT_ALPHAVANTAGE_URL);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let err = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "   "),
            ("ALPHAVANTAGE_API_KEY", "demo"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TELEGRAM_BOT_TOKEN")));
    }

    #[test]
    fn missing_api_key_is_reported() {
        let err = BotConfig::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ALPHAVANTAGE_API_KEY")));
    }

    #[test]
    fn rejects_bad_default_pair() {
        let err = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("ALPHAVANTAGE_API_KEY", "k"),
            ("FX_DEFAULT", "bitcoin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FX_DEFAULT", .. }));
    }
}

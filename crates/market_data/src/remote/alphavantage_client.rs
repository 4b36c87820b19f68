use std::time::Duration;

use async_trait::async_trait;
use common::models::{CurrencyPair, PriceSeries};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::MarketDataError;
use crate::remote::intraday_response::{IntradayBar, closes, parse_intraday_csv};
use crate::traits::QuoteSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
    interval: String,
}

impl AlphaVantageClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        interval: impl Into<String>,
    ) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .user_agent("fx_signal_bot/0.1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            interval: interval.into(),
        })
    }

    /// Latest compact window of `FX_INTRADAY` bars, oldest first. May be empty.
    pub async fn fetch_intraday(
        &self,
        pair: &CurrencyPair,
    ) -> Result<Vec<IntradayBar>, MarketDataError> {
        let url = format!("{}/query", self.base_url);
        debug!("Fetching {} {} bars", pair, self.interval);

        let body = self
            .client
            .get(&url)
            .query(&[
                ("function", "FX_INTRADAY"),
                ("from_symbol", pair.base()),
                ("to_symbol", pair.quote()),
                ("interval", self.interval.as_str()),
                ("datatype", "csv"),
                ("outputsize", "compact"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let bars = parse_intraday_csv(&body).inspect_err(|e| {
            warn!("AlphaVantage returned no usable data for {}: {}", pair, e);
        })?;
        debug!("Received {} bars for {}", bars.len(), pair);
        Ok(bars)
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    async fn fetch_closes(&self, pair: &CurrencyPair) -> Result<PriceSeries, MarketDataError> {
        let series = closes(&self.fetch_intraday(pair).await?);
        if series.is_empty() {
            return Err(MarketDataError::Empty(pair.to_string()));
        }
        Ok(series)
    }
}

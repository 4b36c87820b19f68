use async_trait::async_trait;
use common::models::{CurrencyPair, PriceSeries};

use crate::error::MarketDataError;

/// Anything that can hand back recent closes for a pair, oldest first.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_closes(&self, pair: &CurrencyPair) -> Result<PriceSeries, MarketDataError>;
}

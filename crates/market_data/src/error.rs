use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request to market data provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("market data provider rate limit: {0}")]
    RateLimited(String),
    #[error("market data provider rejected the request: {0}")]
    Rejected(String),
    #[error("malformed price table: {0}")]
    Csv(#[from] csv::Error),
    #[error("bad timestamp `{0}` in price table")]
    Timestamp(String),
    #[error("no prices returned for {0}")]
    Empty(String),
}

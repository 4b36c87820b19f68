pub mod alphavantage_client;
pub mod intraday_response;

pub use alphavantage_client::AlphaVantageClient;
pub use intraday_response::IntradayBar;

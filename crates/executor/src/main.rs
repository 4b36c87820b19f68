use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use common::config::BotConfig;
use common::logger;
use market_data::AlphaVantageClient;
use storage::{CsvSignalLog, InMemoryPairStore};

use crate::services::signal_service::SignalService;
use crate::services::telegram_service::TelegramService;

mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let config = BotConfig::from_env()?;
    info!("Telegram token length: {}", config.telegram_token.len());
    info!(
        "Default pair {}, interval {}, log at {}",
        config.default_pair,
        config.interval,
        config.log_path.display()
    );

    let quotes = AlphaVantageClient::new(
        config.alphavantage_base_url.as_str(),
        config.alphavantage_api_key.as_str(),
        config.interval.as_str(),
    )?;
    let journal = CsvSignalLog::open(&config.log_path)?;
    let signals = Arc::new(SignalService::new(
        quotes,
        InMemoryPairStore::new(),
        journal,
        config.default_pair.clone(),
    ));

    TelegramService::new(&config.telegram_token, signals)
        .start()
        .await;
    Ok(())
}

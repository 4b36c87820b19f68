use std::path::PathBuf;

use chrono::Utc;
use common::models::{CurrencyPair, LogRecord, SignalResult};
use market_data::{MarketDataError, QuoteSource};
use rand::seq::SliceRandom;
use storage::{CsvSignalLog, PairStore, StorageError};
use strategy::{SignalError, compute_signal};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SignalRequestError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// Handles one chat request end to end: pick the pair, fetch closes,
/// compute the signal and append it to the log.
pub struct SignalService<Q, S> {
    quotes: Q,
    pairs: S,
    journal: CsvSignalLog,
    catalog: Vec<CurrencyPair>,
    default_pair: CurrencyPair,
}

impl<Q, S> SignalService<Q, S>
where
    Q: QuoteSource,
    S: PairStore,
{
    pub fn new(quotes: Q, pairs: S, journal: CsvSignalLog, default_pair: CurrencyPair) -> Self {
        Self {
            quotes,
            pairs,
            journal,
            catalog: CurrencyPair::supported(),
            default_pair,
        }
    }

    pub fn catalog(&self) -> &[CurrencyPair] {
        &self.catalog
    }

    /// Picks a supported pair at random and remembers it for the chat.
    pub async fn pick_random_pair(&self, chat_id: i64) -> CurrencyPair {
        let pair = {
            let mut rng = rand::thread_rng();
            self.catalog
                .choose(&mut rng)
                .cloned()
                .unwrap_or_else(|| self.default_pair.clone())
        };
        self.pairs.set(chat_id, pair.clone()).await;
        pair
    }

    pub async fn remember_pair(&self, chat_id: i64, pair: CurrencyPair) {
        info!("Chat {} saved pair {}", chat_id, pair);
        self.pairs.set(chat_id, pair).await;
    }

    /// The chat's remembered pair, or the configured default.
    pub async fn saved_pair(&self, chat_id: i64) -> CurrencyPair {
        self.pairs
            .get(chat_id)
            .await
            .unwrap_or_else(|| self.default_pair.clone())
    }

    pub async fn signal_for(
        &self,
        chat_id: i64,
        pair: &CurrencyPair,
    ) -> Result<SignalResult, SignalRequestError> {
        let prices = self.quotes.fetch_closes(pair).await?;
        let signal = compute_signal(&pair.to_string(), &prices)?;

        info!(
            "Signal for chat {}: {} {} (RSI={:.2})",
            chat_id, signal.symbol, signal.direction, signal.rsi
        );

        let record = LogRecord::from_signal(Utc::now(), chat_id, &signal);
        if let Err(e) = self.journal.append(record).await {
            error!("Failed to append signal log: {}", e);
        }
        Ok(signal)
    }

    /// Path of the log file, once at least one signal has been written.
    pub async fn log_file(&self) -> Result<Option<PathBuf>, StorageError> {
        let has_rows = self.journal.has_rows().await?;
        Ok(has_rows.then(|| self.journal.path().to_path_buf()))
    }
}

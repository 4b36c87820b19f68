use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::models::CurrencyPair;
use tokio::sync::Mutex;

/// Remembers the last pair each chat picked.
#[async_trait]
pub trait PairStore: Send + Sync {
    async fn get(&self, chat_id: i64) -> Option<CurrencyPair>;

    async fn set(&self, chat_id: i64, pair: CurrencyPair);
}

#[derive(Clone, Default)]
pub struct InMemoryPairStore {
    pairs: Arc<Mutex<HashMap<i64, CurrencyPair>>>,
}

impl InMemoryPairStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PairStore for InMemoryPairStore {
    async fn get(&self, chat_id: i64) -> Option<CurrencyPair> {
        let pairs = self.pairs.lock().await;
        pairs.get(&chat_id).cloned()
    }

    async fn set(&self, chat_id: i64, pair: CurrencyPair) {
        let mut pairs = self.pairs.lock().await;
        pairs.insert(chat_id, pair);
    }
}

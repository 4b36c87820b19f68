pub mod error;
pub mod pair_store;
pub mod signal_log;

pub use error::StorageError;
pub use pair_store::{InMemoryPairStore, PairStore};
pub use signal_log::CsvSignalLog;

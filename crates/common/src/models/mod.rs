pub mod log_record;
pub mod pair;
pub mod price_series;
pub mod signal;

pub use log_record::LogRecord;
pub use pair::{CurrencyPair, PairParseError, SUPPORTED_PAIRS};
pub use price_series::PriceSeries;
pub use signal::{Direction, Horizon, SignalResult, Strength};

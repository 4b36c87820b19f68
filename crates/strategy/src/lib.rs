pub mod error;
pub mod indicators;
pub mod services;

pub use error::SignalError;
pub use services::signal_engine::{compute_signal, decide_direction, rate_strength};

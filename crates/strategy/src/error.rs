use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("need at least {required} closes, got {available}")]
    InsufficientData { required: usize, available: usize },
    #[error("close #{index} is not a finite number")]
    NonFinitePrice { index: usize },
    #[error("{indicator} overflowed on these closes")]
    NonFiniteIndicator { indicator: &'static str },
    #[error("indicator setup failed: {0}")]
    Indicator(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("signal log io: {0}")]
    Io(#[from] std::io::Error),
    #[error("signal log csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("signal log task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::SecondsFormat;
use common::models::LogRecord;
use tokio::task;
use tracing::{debug, info};

use crate::error::StorageError;

pub const HEADER: [&str; 10] = [
    "time_utc",
    "chat_id",
    "pair",
    "direction",
    "price",
    "horizon_min",
    "strength",
    "rsi",
    "ma_fast",
    "ma_slow",
];

/// Append-only CSV file of every signal sent. Cheap to clone; file access
/// runs on the blocking pool.
#[derive(Clone)]
pub struct CsvSignalLog {
    file: Arc<LogFile>,
}

struct LogFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvSignalLog {
    /// Opens the log, creating the file with a header row if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(HEADER)?;
            writer.flush()?;
            info!("Created signal log at {}", path.display());
        }

        Ok(Self {
            file: Arc::new(LogFile {
                path,
                write_lock: Mutex::new(()),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    /// True once the file holds more than the header line.
    pub async fn has_rows(&self) -> Result<bool, StorageError> {
        let file = self.file.clone();
        task::spawn_blocking(move || file.has_rows()).await?
    }

    pub async fn append(&self, record: LogRecord) -> Result<(), StorageError> {
        let file = self.file.clone();
        task::spawn_blocking(move || file.append(&record)).await?
    }
}

impl LogFile {
    fn has_rows(&self) -> Result<bool, StorageError> {
        let header_len = HEADER.join(",").len() as u64 + 1;
        Ok(fs::metadata(&self.path)?.len() > header_len)
    }

    fn append(&self, record: &LogRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record([
            record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            record.chat_id.to_string(),
            record.symbol.clone(),
            record.direction.to_string(),
            format!("{:.6}", record.price),
            record
                .horizon_minutes
                .map(|h| h.to_string())
                .unwrap_or_default(),
            record.strength.to_string(),
            format!("{:.4}", record.rsi),
            format!("{:.6}", record.ma_fast),
            format!("{:.6}", record.ma_slow),
        ])?;
        writer.flush()?;

        debug!("Logged {} signal for {}", record.direction, record.symbol);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::models::{Direction, Horizon, Strength};

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("signal-log-{}", uuid::Uuid::new_v4()))
            .join("signals_log.csv")
    }

    fn record(direction: Direction, horizon: Option<Horizon>, strength: Strength) -> LogRecord {
        LogRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap(),
            chat_id: 42,
            symbol: "EUR/USD".to_string(),
            direction,
            price: 1.08541,
            horizon_minutes: horizon,
            strength,
            rsi: 27.123456,
            ma_fast: 1.0851,
            ma_slow: 1.0849,
        }
    }

    #[tokio::test]
    async fn creates_file_with_header() {
        let path = scratch_path();
        let log = CsvSignalLog::open(&path).unwrap();
        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, format!("{}\n", HEADER.join(",")));
        assert!(!log.has_rows().await.unwrap());
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn appends_rows_after_header() {
        let path = scratch_path();
        let log = CsvSignalLog::open(&path).unwrap();

        let horizon = Horizon {
            min_minutes: 2,
            max_minutes: 5,
        };
        log.append(record(Direction::Up, Some(horizon), Strength::Medium))
            .await
            .unwrap();
        log.append(record(Direction::Neutral, None, Strength::Low))
            .await
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(log.has_rows().await.unwrap());
        assert_eq!(
            lines[1],
            "2025-03-14T10:00:00Z,42,EUR/USD,UP,1.085410,2-5,medium,27.1235,1.085100,1.084900"
        );
        assert!(lines[2].contains(",NEUTRAL,1.085410,,low,27.1235,"));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn reopening_keeps_existing_rows() {
        let path = scratch_path();
        CsvSignalLog::open(&path)
            .unwrap()
            .append(record(Direction::Down, None, Strength::High))
            .await
            .unwrap();

        let reopened = CsvSignalLog::open(&path).unwrap();
        assert!(reopened.has_rows().await.unwrap());
        reopened
            .append(record(Direction::Down, None, Strength::High))
            .await
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("time_utc").count(), 1);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn concurrent_appends_keep_rows_whole() {
        let path = scratch_path();
        let log = CsvSignalLog::open(&path).unwrap();

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let log = log.clone();
                tokio::spawn(async move {
                    log.append(record(Direction::Up, None, Strength::High)).await
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 9);
        assert!(content.lines().skip(1).all(|l| l.split(',').count() == HEADER.len()));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}

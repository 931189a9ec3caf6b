use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection};

use crate::model::{ColorSample, SampleSeries};
use crate::store::{decode_record, encode_record, SampleStore, StorageError};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS color_samples (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recorded_at TEXT NOT NULL,
        record TEXT NOT NULL
    );
    CREATE TRIGGER IF NOT EXISTS prevent_update_on_color_samples
    BEFORE UPDATE ON color_samples
    BEGIN
        SELECT RAISE(ABORT, 'color_samples is append-only');
    END;
    CREATE TRIGGER IF NOT EXISTS prevent_delete_on_color_samples
    BEFORE DELETE ON color_samples
    BEGIN
        SELECT RAISE(ABORT, 'color_samples is append-only');
    END;
";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SampleStore for SqliteStore {
    fn append(&self, sample: &ColorSample) -> Result<(), StorageError> {
        let record = encode_record(sample)?;
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        conn.execute(
            "INSERT INTO color_samples (recorded_at, record) VALUES (?1, ?2)",
            params![sample.timestamp().to_rfc3339(), record],
        )?;
        log::debug!("appended sample row {}", conn.last_insert_rowid());
        Ok(())
    }

    fn read_all(&self) -> Result<SampleSeries, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT id, record FROM color_samples ORDER BY id ASC")?;
        let mut rows = stmt.query([])?;

        let mut series = SampleSeries::new();
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            // Read as raw bytes so a non-UTF-8 record is skipped, not fatal.
            let record: Vec<u8> = match row.get_ref(1)?.as_bytes() {
                Ok(raw) => raw.to_vec(),
                Err(e) => {
                    log::warn!("skipping unreadable sample row {}: {}", id, e);
                    continue;
                }
            };
            match decode_record(&record) {
                Ok(sample) => series.insert(sample),
                Err(e) => log::warn!("skipping malformed sample row {}: {}", id, e),
            }
        }
        Ok(series)
    }
}

pub mod file;
pub mod memory;
pub mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ColorSample, SampleSeries};

pub use file::JsonLinesStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to encode sample: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

pub trait SampleStore: Send + Sync {
    fn append(&self, sample: &ColorSample) -> Result<(), StorageError>;
    fn read_all(&self) -> Result<SampleSeries, StorageError>;
}

impl<S: SampleStore + ?Sized> SampleStore for Box<S> {
    fn append(&self, sample: &ColorSample) -> Result<(), StorageError> {
        (**self).append(sample)
    }

    fn read_all(&self) -> Result<SampleSeries, StorageError> {
        (**self).read_all()
    }
}

pub fn encode_record(sample: &ColorSample) -> Result<String, StorageError> {
    Ok(serde_json::to_string(sample)?)
}

pub fn decode_record(raw: &[u8]) -> Result<ColorSample, serde_json::Error> {
    serde_json::from_slice(raw)
}

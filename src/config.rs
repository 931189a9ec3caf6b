use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::fetch::DEFAULT_FETCH_TIMEOUT;
use crate::service::DEFAULT_IMAGE_URL;
use crate::store::{JsonLinesStore, SampleStore, SqliteStore, StorageError};

pub const DEFAULT_STORE_PATH: &str = "sky-color.jsonl";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown storage backend '{0}', expected 'jsonl' or 'sqlite'")]
    UnknownBackend(String),
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    JsonLines,
    Sqlite,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonl" | "json-lines" | "file" => Ok(Backend::JsonLines),
            "sqlite" | "db" => Ok(Backend::Sqlite),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    pub image_url: String,
    pub store_path: PathBuf,
    pub backend: Backend,
    pub fetch_timeout: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_IMAGE_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            backend: Backend::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl SamplerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("SKY_COLOR_IMAGE_URL").filter(|v| !v.trim().is_empty()) {
            config.image_url = url;
        }
        if let Some(path) = lookup("SKY_COLOR_STORE").filter(|v| !v.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }
        if let Some(backend) = lookup("SKY_COLOR_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(secs) = lookup("SKY_COLOR_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = parse_timeout("SKY_COLOR_FETCH_TIMEOUT_SECS", &secs)?;
        }
        Ok(config)
    }

    pub fn open_store(&self) -> Result<Box<dyn SampleStore>, StorageError> {
        Ok(match self.backend {
            Backend::JsonLines => Box::new(JsonLinesStore::new(&self.store_path)),
            Backend::Sqlite => Box::new(SqliteStore::open(&self.store_path)?),
        })
    }
}

pub fn parse_timeout(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

use std::sync::Mutex;

use crate::model::{ColorSample, SampleSeries};
use crate::store::{SampleStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    samples: Mutex<Vec<ColorSample>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleStore for MemoryStore {
    fn append(&self, sample: &ColorSample) -> Result<(), StorageError> {
        let mut samples = self.samples.lock().map_err(|_| StorageError::Poisoned)?;
        samples.push(*sample);
        Ok(())
    }

    fn read_all(&self) -> Result<SampleSeries, StorageError> {
        let samples = self.samples.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(samples.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    #[test]
    fn test_memory_round_trip() {
        testing::round_trip(&MemoryStore::new());
    }

    #[test]
    fn test_memory_empty() {
        assert!(MemoryStore::new().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_memory_concurrent_appends() {
        testing::concurrent_appends_are_kept(&MemoryStore::new());
    }
}

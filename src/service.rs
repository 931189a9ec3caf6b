use chrono::{DateTime, Utc};

use crate::error::SampleError;
use crate::fetch::ImageFetcher;
use crate::model::{ColorSample, SampleSeries};
use crate::reduce::ColorReducer;
use crate::store::{SampleStore, StorageError};

pub const DEFAULT_IMAGE_URL: &str =
    "https://portlandweather.com/assets/images/cameras/PortlandSpiritLiveCam.jpeg";

pub struct SamplingService<F, S> {
    fetcher: F,
    store: S,
    image_url: String,
}

impl<F: ImageFetcher, S: SampleStore> SamplingService<F, S> {
    pub fn new(fetcher: F, store: S, image_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            store,
            image_url: image_url.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sample(&self) -> Result<ColorSample, SampleError> {
        self.sample_at(Utc::now())
    }

    pub fn sample_at(&self, timestamp: DateTime<Utc>) -> Result<ColorSample, SampleError> {
        let bytes = self.fetcher.fetch(&self.image_url)?;
        let rgb = ColorReducer::reduce(&bytes)?;
        let sample = ColorSample::new(timestamp, rgb);
        self.store.append(&sample)?;
        log::info!(
            "recorded {} at {}",
            rgb.to_css(),
            sample.timestamp().to_rfc3339()
        );
        Ok(sample)
    }

    pub fn history(&self) -> Result<SampleSeries, StorageError> {
        self.store.read_all()
    }
}

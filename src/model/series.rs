use serde::{Deserialize, Serialize};

use crate::model::ColorSample;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSeries {
    samples: Vec<ColorSample>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sample: ColorSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ColorSample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&ColorSample> {
        self.samples.last()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ColorSample> {
        self.samples.iter().rev()
    }

    pub fn as_slice(&self) -> &[ColorSample] {
        &self.samples
    }
}

impl From<Vec<ColorSample>> for SampleSeries {
    fn from(samples: Vec<ColorSample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<ColorSample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = ColorSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

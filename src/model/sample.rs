use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    #[serde(with = "timestamp")]
    timestamp: DateTime<Utc>,
    rgb: Rgb,
}

impl ColorSample {
    pub fn new(timestamp: DateTime<Utc>, rgb: Rgb) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            rgb,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    // Older producers wrote millisecond precision, so any RFC 3339 instant is accepted.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(0))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_truncates_to_seconds() {
        let ts = DateTime::<Utc>::from_str("2024-03-01T06:15:42.987Z").unwrap();
        let sample = ColorSample::new(ts, Rgb::new(1, 2, 3));
        assert_eq!(
            sample.timestamp(),
            DateTime::<Utc>::from_str("2024-03-01T06:15:42Z").unwrap()
        );
    }

    #[test]
    fn test_sample_json_shape() {
        let ts = DateTime::<Utc>::from_str("2024-03-01T06:15:42Z").unwrap();
        let sample = ColorSample::new(ts, Rgb::new(120, 140, 180));
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"timestamp":"2024-03-01T06:15:42Z","rgb":[120,140,180]}"#);
    }

    #[test]
    fn test_sample_accepts_millisecond_and_offset_timestamps() {
        let legacy: ColorSample =
            serde_json::from_str(r#"{"timestamp":"2024-06-12T17:05:09.512Z","rgb":[90,110,150]}"#)
                .unwrap();
        assert_eq!(
            legacy.timestamp(),
            DateTime::<Utc>::from_str("2024-06-12T17:05:09Z").unwrap()
        );

        let offset: ColorSample =
            serde_json::from_str(r#"{"timestamp":"2024-06-12T10:05:09-07:00","rgb":[90,110,150]}"#)
                .unwrap();
        assert_eq!(offset.timestamp(), legacy.timestamp());
    }

    #[test]
    fn test_sample_rejects_invalid_timestamp() {
        let result =
            serde_json::from_str::<ColorSample>(r#"{"timestamp":"yesterday","rgb":[1,2,3]}"#);
        assert!(result.is_err());
    }
}

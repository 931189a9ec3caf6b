use std::io::{Cursor, Write};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use image::{ImageFormat, Rgba, RgbaImage};
use sky_color::{
    ColorSample, Export, FetchError, JsonLinesStore, Rgb, SampleError, SampleStore,
    SamplingService, SqliteStore, CANVAS_SIZE, DEFAULT_IMAGE_URL,
};

fn red_png() -> Vec<u8> {
    let image = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([255, 0, 0, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn red_fetcher(_url: &str) -> Result<Vec<u8>, FetchError> {
    Ok(red_png())
}

#[test]
fn test_sample_then_history_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonLinesStore::new(dir.path().join("samples.jsonl"));
    let service = SamplingService::new(red_fetcher, store, DEFAULT_IMAGE_URL);

    let before = Utc::now().timestamp();
    let sample = service.sample().unwrap();
    let after = Utc::now().timestamp();

    assert_eq!(sample.rgb(), Rgb::new(255, 0, 0));
    assert!(sample.timestamp().timestamp() >= before);
    assert!(sample.timestamp().timestamp() <= after);

    let history = service.history().unwrap();
    assert_eq!(history.as_slice(), &[sample]);
    assert_eq!(history, service.history().unwrap());
}

#[test]
fn test_history_survives_restart_and_torn_tail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.jsonl");
    let ts = DateTime::<Utc>::from_str("2024-05-01T10:00:00Z").unwrap();

    let first = SamplingService::new(red_fetcher, JsonLinesStore::new(&path), DEFAULT_IMAGE_URL)
        .sample_at(ts)
        .unwrap();

    // simulate a writer that died mid-record
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"{\"timestamp\":\"2024-05-01T10:05").unwrap();
    drop(file);

    let service = SamplingService::new(red_fetcher, JsonLinesStore::new(&path), DEFAULT_IMAGE_URL);
    assert_eq!(service.history().unwrap().as_slice(), &[first]);

    let second = service.sample_at(ts).unwrap();
    assert_eq!(service.history().unwrap().as_slice(), &[first, second]);
}

#[test]
fn test_sample_with_sqlite_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let service = SamplingService::new(red_fetcher, store, DEFAULT_IMAGE_URL);
    let sample = service.sample().unwrap();
    assert_eq!(service.history().unwrap().as_slice(), &[sample]);
}

#[test]
fn test_failed_fetch_surfaces_to_trigger() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonLinesStore::new(dir.path().join("samples.jsonl"));
    let fetcher = |url: &str| -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Status {
            url: url.to_string(),
            status: 500,
        })
    };
    let service = SamplingService::new(fetcher, store, DEFAULT_IMAGE_URL);

    let err = service.sample().unwrap_err();
    assert!(matches!(err, SampleError::Fetch(_)));
    assert!(err.to_string().contains("500"));
    assert!(service.store().read_all().unwrap().is_empty());
}

#[test]
fn test_history_export_for_display() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonLinesStore::new(dir.path().join("samples.jsonl"));
    store
        .append(&ColorSample::new(
            DateTime::<Utc>::from_str("2024-05-01T10:00:00Z").unwrap(),
            Rgb::new(90, 120, 160),
        ))
        .unwrap();
    store
        .append(&ColorSample::new(
            DateTime::<Utc>::from_str("2024-05-01T10:10:00Z").unwrap(),
            Rgb::new(95, 125, 170),
        ))
        .unwrap();

    let csv = store.read_all().unwrap().to_csv().unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows[1], "2024-05-01 10:10,95,125,170,#5f7daa");
    assert_eq!(rows[2], "2024-05-01 10:00,90,120,160,#5a78a0");
}

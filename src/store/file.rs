use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::model::{ColorSample, SampleSeries};
use crate::store::{decode_record, encode_record, SampleStore, StorageError};

#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_for_append(&self) -> Result<File, StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))
    }
}

// A previous writer may have died mid-line; start on a fresh line so the
// torn record stays isolated.
fn ends_with_torn_record(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl SampleStore for JsonLinesStore {
    fn append(&self, sample: &ColorSample) -> Result<(), StorageError> {
        let record = encode_record(sample)?;
        let mut file = self.open_for_append()?;

        let torn = ends_with_torn_record(&mut file).map_err(|e| StorageError::io(&self.path, e))?;
        let mut line = String::with_capacity(record.len() + 2);
        if torn {
            log::warn!("{} ends with a torn record, starting a new line", self.path.display());
            line.push('\n');
        }
        line.push_str(&record);
        line.push('\n');

        file.write_all(line.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| StorageError::io(&self.path, e))?;
        log::debug!("appended sample to {}", self.path.display());
        Ok(())
    }

    fn read_all(&self) -> Result<SampleSeries, StorageError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SampleSeries::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let mut series = SampleSeries::new();
        for (index, line) in contents.split(|b| *b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match decode_record(line) {
                Ok(sample) => series.insert(sample),
                Err(e) => log::warn!(
                    "skipping malformed record at {}:{}: {}",
                    self.path.display(),
                    index + 1,
                    e
                ),
            }
        }
        Ok(series)
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::export::{Export, ExportError};
use crate::model::{ColorSample, SampleSeries};

#[derive(Serialize)]
struct SwatchRow {
    time: String,
    r: u8,
    g: u8,
    b: u8,
    hex: String,
}

// Nearest minute, halves rounding up.
fn round_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    let secs = (ts.timestamp() + 30).div_euclid(60) * 60;
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(ts)
}

fn format_time(ts: DateTime<Utc>) -> String {
    round_to_minute(ts).format("%Y-%m-%d %H:%M").to_string()
}

fn to_swatch_row(sample: &ColorSample) -> SwatchRow {
    let rgb = sample.rgb();
    SwatchRow {
        time: format_time(sample.timestamp()),
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
        hex: rgb.to_hex(),
    }
}

impl Export for SampleSeries {
    fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for sample in self.newest_first() {
            wtr.serialize(to_swatch_row(sample))?;
        }
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }

    fn to_md(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        use std::io::Write;

        writeln!(buffer, "| Time | R | G | B | Swatch |")?;
        writeln!(buffer, "|------|---|---|---|--------|")?;
        for sample in self.newest_first() {
            let row = to_swatch_row(sample);
            writeln!(
                buffer,
                "| {} | {} | {} | {} | `{}` |",
                row.time, row.r, row.g, row.b, row.hex
            )?;
        }

        Ok(String::from_utf8(buffer)?)
    }

    fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string(self).map_err(ExportError::Json)
    }
}

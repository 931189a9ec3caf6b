use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write sample history as CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush sample history CSV: {0}")]
    CsvFlush(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
    #[error("failed to write sample history as Markdown: {0}")]
    Markdown(#[from] std::io::Error),
    #[error("sample history export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to write sample history as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_export() {
        let err = ExportError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(err.to_string().starts_with("failed to write sample history as JSON"));

        let err = ExportError::from(std::io::Error::new(std::io::ErrorKind::Other, "full"));
        assert_eq!(
            err.to_string(),
            "failed to write sample history as Markdown: full"
        );
    }
}

use crate::error::{ProcessingError, Result};
use crate::models::{CoordinateRecord, CoordinateTable};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, INPUT_DELIMITER, REQUIRED_COLUMNS, SCORE_COLUMN};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

pub struct CoordinateReader {
    delimiter: u8,
}

impl CoordinateReader {
    pub fn new() -> Self {
        Self {
            delimiter: INPUT_DELIMITER,
        }
    }

    /// Read a coordinate table from a file on disk
    pub fn read_path(&self, path: &Path) -> Result<CoordinateTable> {
        let file = File::open(path)?;
        debug!("Reading coordinates from {}", path.display());
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    /// Read a coordinate table from any byte source. The header is checked
    /// for the required columns before any row is decoded.
    pub fn read_from<R: Read>(&self, source: R) -> Result<CoordinateTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        Self::check_schema(&headers)?;
        let has_score = headers.iter().any(|h| h == SCORE_COLUMN);

        let records = reader
            .deserialize::<CoordinateRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            "Loaded {} coordinate rows (score column: {})",
            records.len(),
            has_score
        );

        Ok(CoordinateTable::new(records, has_score))
    }

    fn check_schema(headers: &StringRecord) -> Result<()> {
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ProcessingError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for CoordinateReader {
    fn default() -> Self {
        Self::new()
    }
}

//! CSV decoding and lazy row iteration
//!
//! The reader owns the decoded header and hands out one [`SourceRow`] per data
//! record. Decoding failures of individual records surface as
//! `Error::RowProcessing` items so the caller can log them and keep going.

use std::io;
use std::sync::Arc;
use tracing::debug;

use super::column_index::ColumnIndex;
use super::row::SourceRow;
use crate::{Error, Result};

/// Reader over a wide-format delimited source
pub struct SourceReader<R: io::Read> {
    source_name: String,
    header: Arc<ColumnIndex>,
    records: csv::StringRecordsIntoIter<R>,
    records_seen: u64,
}

impl<'a> SourceReader<&'a [u8]> {
    /// Create a reader over in-memory text
    pub fn from_text(source_name: impl Into<String>, text: &'a str) -> Result<Self> {
        Self::new(source_name, text.as_bytes())
    }
}

impl<R: io::Read> SourceReader<R> {
    /// Create a reader and decode the header row
    ///
    /// Fails with `Error::MalformedSource` when the source has no header row.
    pub fn new(source_name: impl Into<String>, input: R) -> Result<Self> {
        let source_name = source_name.into();

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = csv_reader.headers().map_err(|e| {
            Error::malformed_source(&source_name, format!("Failed to read header row: {}", e))
        })?;

        let header = ColumnIndex::from_record(headers);
        if header.is_empty() {
            return Err(Error::malformed_source(&source_name, "No header row found"));
        }

        debug!(
            "Decoded header for {}: {} columns",
            source_name,
            header.len()
        );

        Ok(Self {
            source_name,
            header: Arc::new(header),
            records: csv_reader.into_records(),
            records_seen: 0,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The decoded header
    pub fn header(&self) -> &ColumnIndex {
        &self.header
    }
}

impl<R: io::Read> Iterator for SourceReader<R> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.records_seen += 1;
        // Header occupies line 1
        let fallback_line = self.records_seen + 1;

        Some(match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                Ok(SourceRow::new(Arc::clone(&self.header), record, line))
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                Err(Error::row_processing(
                    line,
                    format!("Failed to decode record in {}: {}", self.source_name, e),
                ))
            }
        })
    }
}

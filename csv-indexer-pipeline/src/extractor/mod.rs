//! Extractor module for the CSV indexer pipeline.
//!
//! Streams rows from every CSV file in a directory as a lazy, finite,
//! non-restartable sequence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::PipelineError;

/// One CSV record as an ordered field-name to raw-value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// Field values in header order.
    pub fields: Vec<(String, String)>,
}

/// Extractor that streams rows from the CSV files in a directory.
///
/// Files whose name ends in `.csv` (case-insensitive) are read in
/// directory-listing order; rows within a file preserve file order.
/// Each file is parsed with a semicolon delimiter and a header row,
/// and its handle is released once its rows are exhausted.
pub struct CsvExtractor {
    directory: PathBuf,
}

impl CsvExtractor {
    /// Create a new extractor for the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Enumerate the CSV files and return the row iterator.
    ///
    /// The directory is listed eagerly; files are opened lazily, one at a
    /// time, as the iterator advances. Fails if the directory cannot be
    /// read. Parse errors within a file are propagated through the
    /// iterator, with no row-level recovery.
    pub fn rows(&self) -> Result<RowIter, PipelineError> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.ends_with(".csv") {
                files.push(path);
            }
        }

        debug!(
            directory = %self.directory.display(),
            file_count = files.len(),
            "Enumerated CSV files"
        );

        Ok(RowIter {
            files: files.into_iter(),
            current: None,
        })
    }
}

/// Iterator over the rows of all CSV files in a directory.
pub struct RowIter {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<FileRows>,
}

struct FileRows {
    headers: csv::StringRecord,
    records: csv::StringRecordsIntoIter<fs::File>,
}

impl FileRows {
    fn open(path: &Path) -> Result<Self, PipelineError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();

        debug!(file = %path.display(), "Opened CSV file");

        Ok(Self {
            headers,
            records: reader.into_records(),
        })
    }
}

impl Iterator for RowIter {
    type Item = Result<CsvRow, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = &mut self.current {
                match file.records.next() {
                    Some(Ok(record)) => {
                        let fields = file
                            .headers
                            .iter()
                            .zip(record.iter())
                            .map(|(name, value)| (name.to_string(), value.to_string()))
                            .collect();
                        return Some(Ok(CsvRow { fields }));
                    }
                    Some(Err(e)) => {
                        self.current = None;
                        return Some(Err(e.into()));
                    }
                    None => {
                        // File exhausted, drop the handle and advance
                        self.current = None;
                    }
                }
            } else {
                match self.files.next() {
                    Some(path) => match FileRows::open(&path) {
                        Ok(file) => self.current = Some(file),
                        Err(e) => return Some(Err(e)),
                    },
                    None => return None,
                }
            }
        }
    }
}

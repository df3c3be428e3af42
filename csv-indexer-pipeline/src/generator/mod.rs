//! Generator module for the CSV indexer pipeline.
//!
//! Wraps converted rows into bulk documents with sequential identifiers.

use crate::converter;
use crate::extractor::CsvRow;
use csv_indexer_shared::{BulkDocument, FieldMapping};

/// Monotonic document identifier sequence.
///
/// Identifiers start at 1 and increase by 1 per document across all
/// source files. The sequence is owned by its caller; there is no
/// process-wide state, and no concurrency protection is needed because
/// the generator is consumed by a single sequential caller. Re-running
/// the tool restarts the sequence, which is acceptable because the index
/// is rebuilt via delete and recreate.
#[derive(Debug)]
pub struct DocumentSequence {
    next: u64,
}

impl DocumentSequence {
    /// Create a sequence starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next identifier.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for DocumentSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Generator that turns CSV rows into bulk create documents.
pub struct DocumentGenerator {
    mapping: FieldMapping,
    index: String,
    sequence: DocumentSequence,
}

impl DocumentGenerator {
    /// Create a new generator targeting the given index.
    pub fn new(mapping: FieldMapping, index: impl Into<String>, sequence: DocumentSequence) -> Self {
        Self {
            mapping,
            index: index.into(),
            sequence,
        }
    }

    /// Convert a row and wrap it as the next bulk document.
    pub fn generate(&mut self, row: CsvRow) -> BulkDocument {
        let source = converter::convert_row(&self.mapping, row);
        BulkDocument::new(self.sequence.next_id(), self.index.clone(), source)
    }
}

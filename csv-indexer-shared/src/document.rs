//! Bulk document records produced by the generator and consumed by the loader.

use serde_json::{Map, Value};

/// The bulk operation kind for a document.
///
/// The importer always rebuilds the index from scratch, so every document
/// is submitted as a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Create the document; fails if the identifier already exists.
    Create,
}

impl OperationKind {
    /// The bulk API action name for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }
}

/// A converted CSV row wrapped as a single bulk operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDocument {
    /// The operation kind.
    pub op: OperationKind,
    /// Synthetic identifier, unique and strictly increasing within a run.
    pub id: u64,
    /// The target index name.
    pub index: String,
    /// The converted row payload.
    pub source: Map<String, Value>,
}

impl BulkDocument {
    /// Create a new document destined for the given index.
    pub fn new(id: u64, index: impl Into<String>, source: Map<String, Value>) -> Self {
        Self {
            op: OperationKind::Create,
            id,
            index: index.into(),
            source,
        }
    }
}

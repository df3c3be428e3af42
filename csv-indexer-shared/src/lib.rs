//! # CSV Indexer Shared
//!
//! Shared types and data structures for the CSV indexer: the field mapping
//! loaded from the JSON mapping file, the enumerated field type tags used
//! for value coercion, and the bulk document records handed to the loader.

pub mod document;
pub mod mapping;

pub use document::{BulkDocument, OperationKind};
pub use mapping::{FieldMapping, FieldType, MappingError};

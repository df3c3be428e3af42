//! # CSV Indexer Pipeline
//!
//! This crate provides the pipeline components for reading CSV files and
//! bulk-loading them into the search index.
//!
//! ## Architecture
//!
//! The pipeline follows the Extractor-Converter-Generator-Loader pattern:
//!
//! 1. **Extractor**: Streams rows from the CSV files in a directory
//! 2. **Converter**: Coerces raw string values to their declared types
//! 3. **Generator**: Wraps converted rows into bulk documents with
//!    sequential identifiers
//! 4. **Loader**: Batches documents and submits them through the provider
//! 5. **Orchestrator**: Runs the index lifecycle and drives the pipeline

pub mod converter;
pub mod errors;
pub mod extractor;
pub mod generator;
pub mod loader;
pub mod orchestrator;

pub use errors::PipelineError;

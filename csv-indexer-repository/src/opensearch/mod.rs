//! OpenSearch backend for the CSV indexer.
//!
//! This module contains the concrete [`SearchIndexProvider`] implementation
//! backed by the OpenSearch Rust client.
//!
//! [`SearchIndexProvider`]: crate::interfaces::SearchIndexProvider

mod client;

pub use client::OpenSearchClient;

//! OpenSearch implementation of the document store.
//!
//! This module provides a concrete implementation of `DocumentStore`
//! using OpenSearch as the backend, plus the index mappings it provisions.

mod client;
mod index_config;

pub use client::OpenSearchStore;
pub use index_config::{field_types, index_body, FieldType};

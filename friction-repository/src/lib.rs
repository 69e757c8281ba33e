//! # Friction Repository
//!
//! This crate provides the document store seam used by the loader: the
//! [`DocumentStore`] trait, the index mappings for every record kind, and a
//! concrete implementation backed by OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{Credentials, StoreConfig};
pub use errors::StoreError;
pub use interfaces::DocumentStore;
pub use opensearch::{index_body, FieldType, OpenSearchStore};
pub use types::{BulkItemError, BulkSummary};

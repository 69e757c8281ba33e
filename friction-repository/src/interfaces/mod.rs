//! Interface definitions for the document store.
//!
//! The loader only ever talks to a `dyn DocumentStore`, so the OpenSearch
//! backend can be swapped for an in-memory one in tests.

mod document_store;

pub use document_store::DocumentStore;

//! Document store trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreError;
use crate::types::BulkSummary;

/// Abstract interface over the document-indexing engine.
///
/// Covers exactly what provisioning and ingestion need: a connectivity probe,
/// index lifecycle, one bulk write per collection and a document count.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the loader still uses them strictly
/// sequentially.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether the store is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The store answered
    /// * `Ok(false)` - The store answered with a failure status
    /// * `Err(StoreError)` - The request could not be made
    async fn ping(&self) -> Result<bool, StoreError>;

    /// Check whether an index with this name exists.
    async fn index_exists(&self, index: &str) -> Result<bool, StoreError>;

    /// Delete an index and every document in it.
    async fn delete_index(&self, index: &str) -> Result<(), StoreError>;

    /// Create an index from a settings/mappings body.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - The creation body, e.g. `{"mappings": {"properties": {...}}}`
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), StoreError>;

    /// Write all documents to an index in a single bulk request.
    ///
    /// Documents rejected by the store are counted in the returned summary;
    /// only a failure of the request itself is an error.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Succeeded and failed counts plus per-item errors
    /// * `Err(StoreError::BulkIndexError)` - If the request failed entirely
    async fn bulk_index(&self, index: &str, documents: &[Value]) -> Result<BulkSummary, StoreError>;

    /// Make recently written documents visible to searches and counts.
    async fn refresh_index(&self, index: &str) -> Result<(), StoreError>;

    /// Number of documents stored in an index.
    async fn count(&self, index: &str) -> Result<u64, StoreError>;
}

//! Result types for store operations.

/// A document the store refused during a bulk write.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemError {
    /// Position of the document within the submitted batch.
    pub position: usize,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Error type and reason as reported by the store.
    pub reason: String,
}

/// Aggregate outcome of one bulk write.
///
/// Partial failure is normal: callers report `failed` and move on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
    /// Documents submitted.
    pub total: usize,
    /// Documents stored.
    pub succeeded: usize,
    /// Documents rejected.
    pub failed: usize,
    /// Details for each rejected document.
    pub errors: Vec<BulkItemError>,
}

impl BulkSummary {
    /// A summary in which every submitted document was stored.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

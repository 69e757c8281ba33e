//! Index provisioning, bulk loading and count verification.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use friction_generator::Dataset;
use friction_repository::{index_body, BulkSummary, DocumentStore};
use friction_shared::RecordKind;

use crate::LoaderError;

/// What happened to one index during a reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub kind: RecordKind,
    /// Whether an existing index was dropped first.
    pub deleted_existing: bool,
}

/// Result of the bulk write for one index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLoad {
    pub kind: RecordKind,
    pub summary: BulkSummary,
}

/// Documents stored in an index after loading, next to what was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub kind: RecordKind,
    /// Documents the bulk write reported as stored.
    pub expected: usize,
    /// Documents the store counts in the index.
    pub stored: u64,
}

impl Verification {
    pub fn matches(&self) -> bool {
        self.expected as u64 == self.stored
    }
}

/// Provisions the telemetry indices and loads datasets into them.
///
/// Every call is awaited before the next one is issued; the first store
/// failure is returned to the caller and nothing is retried.
pub struct Loader {
    store: Arc<dyn DocumentStore>,
}

impl Loader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Drop the index for `kind` if it exists, then create it with its mapping.
    ///
    /// Destructive: any documents in the existing index are lost.
    pub async fn reset_index(&self, kind: RecordKind) -> Result<ResetOutcome, LoaderError> {
        let index = kind.index_name();

        let deleted_existing = if self.store.index_exists(index).await? {
            self.store.delete_index(index).await?;
            info!(index = %index, "Deleted existing index");
            true
        } else {
            false
        };

        self.store.create_index(index, &index_body(kind)).await?;
        info!(index = %index, "Created index");

        Ok(ResetOutcome {
            kind,
            deleted_existing,
        })
    }

    /// Reset all five indices in load order, passing each outcome to
    /// `on_reset` as soon as it is known.
    pub async fn reset_indices<F>(&self, mut on_reset: F) -> Result<Vec<ResetOutcome>, LoaderError>
    where
        F: FnMut(&ResetOutcome),
    {
        let mut outcomes = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            let outcome = self.reset_index(kind).await?;
            on_reset(&outcome);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Write `documents` to the index for `kind` in one bulk request.
    ///
    /// Rejected documents are reported in the summary and do not fail the call.
    pub async fn load_index(
        &self,
        kind: RecordKind,
        documents: &[Value],
    ) -> Result<IndexLoad, LoaderError> {
        let index = kind.index_name();
        debug!(index = %index, count = documents.len(), "Submitting bulk write");

        let summary = self.store.bulk_index(index, documents).await?;

        if summary.has_failures() {
            warn!(
                index = %index,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Some documents were rejected"
            );
            for item in summary.errors.iter().take(5) {
                debug!(index = %index, position = item.position, status = item.status, reason = %item.reason, "Rejected document");
            }
        } else {
            info!(index = %index, succeeded = summary.succeeded, "Bulk write complete");
        }

        Ok(IndexLoad { kind, summary })
    }

    /// Load every collection of `dataset` into its index, in load order,
    /// passing each result to `on_load`.
    pub async fn load_dataset<F>(
        &self,
        dataset: &Dataset,
        mut on_load: F,
    ) -> Result<Vec<IndexLoad>, LoaderError>
    where
        F: FnMut(&IndexLoad),
    {
        let mut loads = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            let documents = dataset.documents(kind)?;
            let load = self.load_index(kind, &documents).await?;
            on_load(&load);
            loads.push(load);
        }
        Ok(loads)
    }

    /// Refresh each loaded index and compare its count with the bulk result.
    pub async fn verify(&self, loads: &[IndexLoad]) -> Result<Vec<Verification>, LoaderError> {
        let mut verifications = Vec::with_capacity(loads.len());

        for load in loads {
            let index = load.kind.index_name();
            self.store.refresh_index(index).await?;
            let stored = self.store.count(index).await?;

            let verification = Verification {
                kind: load.kind,
                expected: load.summary.succeeded,
                stored,
            };
            if !verification.matches() {
                warn!(index = %index, expected = verification.expected, stored, "Stored count differs from bulk result");
            }
            verifications.push(verification);
        }

        Ok(verifications)
    }
}

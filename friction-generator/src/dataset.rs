//! The five generated record collections.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use friction_shared::{CartEvent, CheckoutStep, ErrorLog, RecordKind, SearchQuery, SessionView};

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub user_sessions: Vec<SessionView>,
    pub search_queries: Vec<SearchQuery>,
    pub cart_events: Vec<CartEvent>,
    pub checkout_flows: Vec<CheckoutStep>,
    pub error_logs: Vec<ErrorLog>,
}

impl Dataset {
    /// Number of records of the given kind.
    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::UserSessions => self.user_sessions.len(),
            RecordKind::SearchQueries => self.search_queries.len(),
            RecordKind::CartEvents => self.cart_events.len(),
            RecordKind::CheckoutFlows => self.checkout_flows.len(),
            RecordKind::ErrorLogs => self.error_logs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }

    /// Records across all kinds.
    pub fn total_records(&self) -> usize {
        RecordKind::ALL.iter().map(|kind| self.len(*kind)).sum()
    }

    /// Number of distinct checkouts behind the checkout step records.
    pub fn checkout_count(&self) -> usize {
        self.checkout_flows
            .iter()
            .map(|step| step.checkout_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// The records of one kind as JSON documents, ready for indexing.
    pub fn documents(&self, kind: RecordKind) -> Result<Vec<Value>, serde_json::Error> {
        match kind {
            RecordKind::UserSessions => to_documents(&self.user_sessions),
            RecordKind::SearchQueries => to_documents(&self.search_queries),
            RecordKind::CartEvents => to_documents(&self.cart_events),
            RecordKind::CheckoutFlows => to_documents(&self.checkout_flows),
            RecordKind::ErrorLogs => to_documents(&self.error_logs),
        }
    }
}

fn to_documents<T: Serialize>(records: &[T]) -> Result<Vec<Value>, serde_json::Error> {
    records.iter().map(serde_json::to_value).collect()
}

//! In-memory document store for loader tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;

use friction_repository::{BulkItemError, BulkSummary, DocumentStore, FieldType, StoreError};

#[derive(Default)]
struct Index {
    mapping: Value,
    documents: Vec<Value>,
}

/// Mock store that keeps indices in memory and enforces their mappings on
/// bulk writes the way a real cluster rejects mistyped fields.
pub struct MockStore {
    reachable: bool,
    indices: Mutex<HashMap<String, Index>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            reachable: true,
            indices: Mutex::new(HashMap::new()),
        }
    }

    /// A store whose connectivity check always fails.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    pub async fn mapping(&self, index: &str) -> Option<Value> {
        let indices = self.indices.lock().unwrap();
        indices.get(index).map(|i| i.mapping.clone())
    }

    pub async fn documents(&self, index: &str) -> Vec<Value> {
        let indices = self.indices.lock().unwrap();
        indices
            .get(index)
            .map(|i| i.documents.clone())
            .unwrap_or_default()
    }

    /// Store documents directly, bypassing mapping checks.
    pub async fn seed_documents(&self, index: &str, documents: Vec<Value>) {
        let mut indices = self.indices.lock().unwrap();
        indices
            .entry(index.to_string())
            .or_default()
            .documents
            .extend(documents);
    }
}

fn field_type(mapping: &Value, field: &str) -> Option<FieldType> {
    mapping["mappings"]["properties"][field]["type"]
        .as_str()
        .and_then(FieldType::from_name)
}

fn accepts(field_type: FieldType, value: &Value) -> bool {
    if value.is_null() {
        return true;
    }
    match field_type {
        FieldType::Keyword | FieldType::Text => value.is_string(),
        FieldType::Date => value
            .as_str()
            .map(|s| DateTime::parse_from_rfc3339(s).is_ok())
            .unwrap_or(false),
        FieldType::Integer => value.is_i64() || value.is_u64(),
        FieldType::Float => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
    }
}

/// The first field of `document` that its mapping rejects.
fn rejection(mapping: &Value, document: &Value) -> Option<String> {
    let Some(fields) = document.as_object() else {
        return Some("mapper_parsing_exception: document is not an object".to_string());
    };

    fields.iter().find_map(|(name, value)| {
        let expected = field_type(mapping, name)?;
        (!accepts(expected, value)).then(|| {
            format!(
                "mapper_parsing_exception: failed to parse field [{}] of type [{}]",
                name,
                expected.as_str()
            )
        })
    })
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn ping(&self) -> Result<bool, StoreError> {
        Ok(self.reachable)
    }

    async fn index_exists(&self, index: &str) -> Result<bool, StoreError> {
        Ok(self.indices.lock().unwrap().contains_key(index))
    }

    async fn delete_index(&self, index: &str) -> Result<(), StoreError> {
        self.indices
            .lock()
            .unwrap()
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| StoreError::index_deletion(format!("no such index [{}]", index)))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), StoreError> {
        let mut indices = self.indices.lock().unwrap();
        if indices.contains_key(index) {
            return Err(StoreError::index_creation(format!(
                "resource_already_exists_exception: index [{}] already exists",
                index
            )));
        }
        indices.insert(
            index.to_string(),
            Index {
                mapping: body.clone(),
                documents: Vec::new(),
            },
        );
        Ok(())
    }

    async fn bulk_index(&self, index: &str, documents: &[Value]) -> Result<BulkSummary, StoreError> {
        let mut indices = self.indices.lock().unwrap();
        let target = indices
            .get_mut(index)
            .ok_or_else(|| StoreError::bulk_index(format!("no such index [{}]", index)))?;

        let mut summary = BulkSummary {
            total: documents.len(),
            ..BulkSummary::default()
        };

        for (position, document) in documents.iter().enumerate() {
            match rejection(&target.mapping, document) {
                Some(reason) => summary.errors.push(BulkItemError {
                    position,
                    status: 400,
                    reason,
                }),
                None => target.documents.push(document.clone()),
            }
        }

        summary.failed = summary.errors.len();
        summary.succeeded = summary.total - summary.failed;
        Ok(summary)
    }

    async fn refresh_index(&self, index: &str) -> Result<(), StoreError> {
        if self.indices.lock().unwrap().contains_key(index) {
            Ok(())
        } else {
            Err(StoreError::query(format!("no such index [{}]", index)))
        }
    }

    async fn count(&self, index: &str) -> Result<u64, StoreError> {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .map(|i| i.documents.len() as u64)
            .ok_or_else(|| StoreError::query(format!("no such index [{}]", index)))
    }
}

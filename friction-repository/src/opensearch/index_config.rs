//! Index mappings for every record kind.
//!
//! Each index gets an explicit mapping so the store enforces field types at
//! write time instead of guessing them from the first document.

use serde_json::{json, Map, Value};

use friction_shared::RecordKind;

/// Field types used by the telemetry indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Exact-match strings: identifiers, URLs, enumerations.
    Keyword,
    /// Analyzed full-text strings.
    Text,
    Date,
    Integer,
    Float,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keyword" => Some(FieldType::Keyword),
            "text" => Some(FieldType::Text),
            "date" => Some(FieldType::Date),
            "integer" => Some(FieldType::Integer),
            "float" => Some(FieldType::Float),
            "boolean" => Some(FieldType::Boolean),
            _ => None,
        }
    }
}

/// Field names and types of the index holding `kind`, in document order.
pub fn field_types(kind: RecordKind) -> &'static [(&'static str, FieldType)] {
    use FieldType::*;

    match kind {
        RecordKind::UserSessions => &[
            ("session_id", Keyword),
            ("user_id", Keyword),
            ("timestamp", Date),
            ("page_url", Keyword),
            ("page_load_time", Float),
            ("action", Keyword),
            ("bounce", Boolean),
        ],
        RecordKind::SearchQueries => &[
            ("query_id", Keyword),
            ("user_id", Keyword),
            ("search_term", Text),
            ("results_count", Integer),
            ("timestamp", Date),
        ],
        RecordKind::CartEvents => &[
            ("cart_id", Keyword),
            ("user_id", Keyword),
            ("action", Keyword),
            ("product_id", Keyword),
            ("product_name", Text),
            ("timestamp", Date),
            ("cart_value", Float),
        ],
        RecordKind::CheckoutFlows => &[
            ("checkout_id", Keyword),
            ("user_id", Keyword),
            ("step", Keyword),
            ("time_spent", Integer),
            ("completed", Boolean),
            ("abandoned", Boolean),
            ("timestamp", Date),
            ("cart_value", Float),
        ],
        RecordKind::ErrorLogs => &[
            ("error_id", Keyword),
            ("url", Keyword),
            ("error_code", Integer),
            ("timestamp", Date),
            ("user_id", Keyword),
        ],
    }
}

/// Index creation body for `kind`: `{"mappings": {"properties": {...}}}`.
pub fn index_body(kind: RecordKind) -> Value {
    let properties: Map<String, Value> = field_types(kind)
        .iter()
        .map(|(name, field_type)| (name.to_string(), json!({ "type": field_type.as_str() })))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}

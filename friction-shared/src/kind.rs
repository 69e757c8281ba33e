//! Record kinds and the index each kind is stored in.

use std::fmt;

/// The five kinds of telemetry record.
///
/// The declaration order is the order in which indices are provisioned and
/// loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    UserSessions,
    SearchQueries,
    CartEvents,
    CheckoutFlows,
    ErrorLogs,
}

impl RecordKind {
    /// All kinds, in load order.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::UserSessions,
        RecordKind::SearchQueries,
        RecordKind::CartEvents,
        RecordKind::CheckoutFlows,
        RecordKind::ErrorLogs,
    ];

    /// Name of the index holding records of this kind.
    pub fn index_name(&self) -> &'static str {
        match self {
            RecordKind::UserSessions => "user-sessions",
            RecordKind::SearchQueries => "search-queries",
            RecordKind::CartEvents => "cart-events",
            RecordKind::CheckoutFlows => "checkout-flows",
            RecordKind::ErrorLogs => "error-logs",
        }
    }

    /// Human-readable plural label used in progress output.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::UserSessions => "user sessions",
            RecordKind::SearchQueries => "search queries",
            RecordKind::CartEvents => "cart events",
            RecordKind::CheckoutFlows => "checkout flows",
            RecordKind::ErrorLogs => "error logs",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.index_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_names() {
        let names: Vec<&str> = RecordKind::ALL.iter().map(|k| k.index_name()).collect();
        assert_eq!(
            names,
            vec![
                "user-sessions",
                "search-queries",
                "cart-events",
                "checkout-flows",
                "error-logs"
            ]
        );
    }

    #[test]
    fn test_display_is_index_name() {
        assert_eq!(RecordKind::CheckoutFlows.to_string(), "checkout-flows");
        assert_eq!(RecordKind::ErrorLogs.label(), "error logs");
    }
}

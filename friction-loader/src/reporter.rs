//! Human-facing console output for a generate-and-load run.
//!
//! Everything here goes to stdout. Diagnostic logging goes through `tracing`
//! and is controlled separately with `RUST_LOG`.

use colored::*;

use friction_generator::Dataset;
use friction_shared::RecordKind;

use crate::loader::{IndexLoad, ResetOutcome, Verification};

/// Analytical queries to try once the data is loaded: (title, ES|QL).
pub const EXAMPLE_QUERIES: [(&str, &str); 3] = [
    (
        "Failed searches",
        r#"FROM "search-queries" | WHERE results_count == 0 | STATS count = COUNT(*) BY search_term | SORT count DESC"#,
    ),
    (
        "Slow pages",
        r#"FROM "user-sessions" | WHERE page_load_time > 3.0 | STATS avg_load = AVG(page_load_time) BY page_url | SORT avg_load DESC"#,
    ),
    (
        "Cart abandonment",
        r#"FROM "checkout-flows" | WHERE abandoned == true | STATS count = COUNT(*) BY step"#,
    ),
];

const RULE_WIDTH: usize = 60;

/// Prints progress and summaries to the console.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    enabled: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// A reporter that prints nothing.
    pub fn silent() -> Self {
        Self { enabled: false }
    }

    fn line(&self, text: impl std::fmt::Display) {
        if self.enabled {
            println!("{}", text);
        }
    }

    pub fn banner(&self, title: &str) {
        self.line("");
        self.line("=".repeat(RULE_WIDTH));
        self.line(title.to_uppercase().bold());
        self.line("=".repeat(RULE_WIDTH));
    }

    pub fn generating(&self, kind: RecordKind, count: usize) {
        self.line(format!("→ {}", generating_line(kind, count)).cyan());
    }

    pub fn generated(&self, dataset: &Dataset) {
        self.line("");
        self.line(format!("✓ {}", generated_line(dataset)).green());
    }

    pub fn section(&self, title: &str) {
        self.line("");
        self.line(title.bold());
    }

    pub fn connecting(&self, url: &str) {
        self.section(&format!("Connecting to {}...", url));
    }

    pub fn connected(&self) {
        self.line("✓ Connected successfully".green());
    }

    pub fn index_reset(&self, outcome: &ResetOutcome) {
        let index = outcome.kind.index_name();
        if outcome.deleted_existing {
            self.line(format!("  ⚠ Deleted existing index: {}", index).yellow());
        }
        self.line(format!("  ✓ Created: {}", index).green());
    }

    pub fn ingested(&self, load: &IndexLoad) {
        let text = format!("  {}", load_line(load));
        if load.summary.has_failures() {
            self.line(text.yellow());
        } else {
            self.line(text.green());
        }
    }

    pub fn ingested_total(&self, loads: &[IndexLoad]) {
        let total: usize = loads.iter().map(|l| l.summary.succeeded).sum();
        self.line("");
        self.line(format!("✓ TOTAL DOCUMENTS INGESTED: {}", total).green().bold());
    }

    pub fn verified(&self, verification: &Verification) {
        let text = format!("  {}", verification_line(verification));
        if verification.matches() {
            self.line(text.green());
        } else {
            self.line(text.red());
        }
    }

    pub fn complete(&self) {
        self.banner("Data setup complete");
    }

    pub fn example_queries(&self) {
        self.line("");
        self.line("Next: try these ES|QL queries against the loaded indices:".bold());
        for (number, (title, query)) in EXAMPLE_QUERIES.iter().enumerate() {
            self.line("");
            self.line(format!("{}. {}:", number + 1, title));
            self.line(format!("   {}", query).dimmed());
        }
    }
}

fn generating_line(kind: RecordKind, count: usize) -> String {
    format!("Generating {} {}...", count, kind.label())
}

fn generated_line(dataset: &Dataset) -> String {
    format!(
        "Generated {} total records ({} checkouts across {} funnel steps)",
        dataset.total_records(),
        dataset.checkout_count(),
        dataset.checkout_flows.len()
    )
}

fn load_line(load: &IndexLoad) -> String {
    let index = load.kind.index_name();
    if load.summary.has_failures() {
        format!(
            "⚠ {}: {} documents, {} failed",
            index, load.summary.succeeded, load.summary.failed
        )
    } else {
        format!("✓ {}: {} documents", index, load.summary.succeeded)
    }
}

fn verification_line(verification: &Verification) -> String {
    let index = verification.kind.index_name();
    if verification.matches() {
        format!("✓ {}: {} docs", index, verification.stored)
    } else {
        format!(
            "✗ {}: {} docs (expected {})",
            index, verification.stored, verification.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friction_repository::{BulkItemError, BulkSummary};

    #[test]
    fn test_generating_line() {
        assert_eq!(
            generating_line(RecordKind::UserSessions, 2000),
            "Generating 2000 user sessions..."
        );
        assert_eq!(
            generating_line(RecordKind::CheckoutFlows, 600),
            "Generating 600 checkout flows..."
        );
    }

    #[test]
    fn test_load_line_with_failures() {
        let load = IndexLoad {
            kind: RecordKind::SearchQueries,
            summary: BulkSummary {
                total: 1000,
                succeeded: 995,
                failed: 5,
                errors: vec![BulkItemError {
                    position: 0,
                    status: 400,
                    reason: "mapper_parsing_exception".to_string(),
                }],
            },
        };

        assert_eq!(load_line(&load), "⚠ search-queries: 995 documents, 5 failed");
    }

    #[test]
    fn test_load_line_clean() {
        let load = IndexLoad {
            kind: RecordKind::ErrorLogs,
            summary: BulkSummary::all_succeeded(300),
        };
        assert_eq!(load_line(&load), "✓ error-logs: 300 documents");
    }

    #[test]
    fn test_verification_line() {
        let ok = Verification {
            kind: RecordKind::CartEvents,
            expected: 800,
            stored: 800,
        };
        assert_eq!(verification_line(&ok), "✓ cart-events: 800 docs");

        let short = Verification {
            stored: 790,
            ..ok
        };
        assert_eq!(
            verification_line(&short),
            "✗ cart-events: 790 docs (expected 800)"
        );
    }

    #[test]
    fn test_example_queries_target_loaded_indices() {
        let indices = ["search-queries", "user-sessions", "checkout-flows"];
        for ((_, query), index) in EXAMPLE_QUERIES.iter().zip(indices) {
            assert!(query.starts_with(&format!("FROM \"{}\"", index)));
            assert!(RecordKind::ALL.iter().any(|kind| kind.index_name() == index));
        }
    }
}

//! Telemetry record definitions.
//!
//! Field names and value types match the index mappings exactly, so a record
//! serializes straight into an indexable document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the visitor did on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    ViewPage,
    ViewProduct,
}

impl PageAction {
    pub const ALL: [PageAction; 2] = [PageAction::ViewPage, PageAction::ViewProduct];
}

/// A single page view within a visitor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub page_url: String,
    /// Seconds, rounded to two decimals.
    pub page_load_time: f64,
    pub action: PageAction,
    pub bounce: bool,
}

/// A site search and how many results it returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query_id: String,
    pub user_id: String,
    pub search_term: String,
    pub results_count: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    AddToCart,
}

/// A product added to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEvent {
    pub cart_id: String,
    pub user_id: String,
    pub action: CartAction,
    pub product_id: String,
    pub product_name: String,
    pub timestamp: DateTime<Utc>,
    pub cart_value: f64,
}

/// Stages of the checkout funnel, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStage {
    Cart,
    Shipping,
    Payment,
    Review,
    Complete,
}

impl CheckoutStage {
    /// The full funnel.
    pub const FUNNEL: [CheckoutStage; 5] = [
        CheckoutStage::Cart,
        CheckoutStage::Shipping,
        CheckoutStage::Payment,
        CheckoutStage::Review,
        CheckoutStage::Complete,
    ];

    pub fn is_complete(&self) -> bool {
        matches!(self, CheckoutStage::Complete)
    }
}

/// One step a visitor reached while checking out.
///
/// A checkout emits one of these per funnel stage it reached, all sharing the
/// same `checkout_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStep {
    pub checkout_id: String,
    pub user_id: String,
    pub step: CheckoutStage,
    /// Seconds spent on the step.
    pub time_spent: u32,
    pub completed: bool,
    pub abandoned: bool,
    pub timestamp: DateTime<Utc>,
    pub cart_value: f64,
}

/// An HTTP error served to a visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub error_id: String,
    pub url: String,
    pub error_code: u16,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn test_checkout_step_serializes_flat() {
        let step = CheckoutStep {
            checkout_id: "co_0123456789ab".to_string(),
            user_id: "user_0042".to_string(),
            step: CheckoutStage::Payment,
            time_spent: 95,
            completed: false,
            abandoned: true,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            cart_value: 123.45,
        };

        let value = serde_json::to_value(&step).unwrap();

        assert_eq!(
            value,
            json!({
                "checkout_id": "co_0123456789ab",
                "user_id": "user_0042",
                "step": "payment",
                "time_spent": 95,
                "completed": false,
                "abandoned": true,
                "timestamp": "2024-03-01T12:30:00Z",
                "cart_value": 123.45
            })
        );
    }

    #[test]
    fn test_action_names() {
        assert_eq!(serde_json::to_value(PageAction::ViewProduct).unwrap(), json!("view_product"));
        assert_eq!(serde_json::to_value(CartAction::AddToCart).unwrap(), json!("add_to_cart"));
    }

    #[test]
    fn test_funnel_order() {
        let names: Vec<Value> = CheckoutStage::FUNNEL
            .iter()
            .map(|s| serde_json::to_value(s).unwrap())
            .collect();
        assert_eq!(names, vec![json!("cart"), json!("shipping"), json!("payment"), json!("review"), json!("complete")]);
        assert!(CheckoutStage::Complete.is_complete());
        assert!(!CheckoutStage::Review.is_complete());
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billed event (initial purchase or renewal) within a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub completed: bool,
    /// When the order last changed state.
    pub changed: jiff::Timestamp,
    pub currency: String,
    pub total: Decimal,
    pub tax: Decimal,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: Option<String>,
    /// Unit price before tax for one billing cycle.
    pub subtotal: Decimal,
    /// Reference of the subscription this item renews, if any.
    pub subscription: Option<String>,
}

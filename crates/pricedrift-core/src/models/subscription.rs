use serde::{Deserialize, Serialize};

use super::order::Order;

/// A recurring billing relationship and its order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub reference: String,
    /// Oldest order first.
    pub orders: Vec<Order>,
}

impl Subscription {
    pub fn new(reference: impl Into<String>, orders: Vec<Order>) -> Self {
        Self {
            reference: reference.into(),
            orders,
        }
    }

    /// Build from a history delivered newest-first, as the commerce API returns it.
    pub fn from_newest_first(reference: impl Into<String>, mut orders: Vec<Order>) -> Self {
        orders.reverse();
        Self::new(reference, orders)
    }
}

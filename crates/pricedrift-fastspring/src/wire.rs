//! JSON shapes returned by the subscriptions API.
//!
//! Fields the audit does not read are ignored. Most fields default so that
//! failed or partially populated orders still decode.

use pricedrift_core::models::order::{LineItem, Order};
use pricedrift_core::models::subscription::Subscription;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;

/// One page of `GET /subscriptions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionId>,
}

/// Listed subscriptions come back either as bare ids or as objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubscriptionId {
    Object { id: String },
    Plain(String),
}

impl SubscriptionId {
    pub fn into_id(self) -> String {
        match self {
            Self::Object { id } | Self::Plain(id) => id,
        }
    }
}

/// One element of `GET /subscriptions/{id}/entries`.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub order: WireOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireOrder {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Epoch milliseconds.
    #[serde(default)]
    pub changed: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub items: Vec<WireItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireItem {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub subscription: Option<String>,
}

impl From<WireItem> for LineItem {
    fn from(item: WireItem) -> Self {
        Self {
            sku: item.sku,
            subtotal: item.subtotal,
            subscription: item.subscription,
        }
    }
}

impl TryFrom<WireOrder> for Order {
    type Error = ApiError;

    fn try_from(order: WireOrder) -> Result<Self, Self::Error> {
        let changed = jiff::Timestamp::from_millisecond(order.changed).map_err(|e| {
            ApiError::Timestamp {
                order: order.reference.clone().unwrap_or_default(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            completed: order.completed,
            changed,
            currency: order.currency,
            total: order.total,
            tax: order.tax,
            items: order.items.into_iter().map(LineItem::from).collect(),
        })
    }
}

pub fn parse_page(path: &str, body: &[u8]) -> Result<SubscriptionPage, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Decode an entries body (newest-first) into an oldest-first subscription.
///
/// The reference is the `subscription` field of the oldest order's first
/// item, falling back to the id the history was requested for.
pub fn parse_history(id: &str, path: &str, body: &[u8]) -> Result<Subscription, ApiError> {
    let entries: Vec<Entry> = serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let orders = entries
        .into_iter()
        .map(|entry| Order::try_from(entry.order))
        .collect::<Result<Vec<_>, _>>()?;

    let mut subscription = Subscription::from_newest_first(id, orders);
    if let Some(reference) = subscription
        .orders
        .first()
        .and_then(|order| order.items.first())
        .and_then(|item| item.subscription.clone())
    {
        subscription.reference = reference;
    }
    Ok(subscription)
}

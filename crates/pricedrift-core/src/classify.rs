//! Unit-price drift detection over one subscription's order history.
//!
//! The unit price of a renewing item should not move during a
//! subscription's lifetime unless the product or currency changes with
//! it. Orders are walked oldest-first against a rolling baseline; any
//! completed order whose unit subtotal differs under the same currency
//! and SKU is an anomaly, attributed to one of three causes.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::models::order::{LineItem, Order};
use crate::models::record::ClassificationRecord;
use crate::models::subscription::Subscription;
use crate::money::round_amount;

/// 2022-01-01T00:00:00Z
const OVERCHARGE_SINCE: Timestamp = Timestamp::constant(1_640_995_200, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Anomalous orders changed at or after this instant whose total went
    /// up are attributed to the 2022 vendor overcharge defect.
    pub overcharge_since: Timestamp,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            overcharge_since: OVERCHARGE_SINCE,
        }
    }
}

/// The last order treated as correctly priced.
#[derive(Debug, Clone, Copy)]
struct Baseline<'a> {
    currency: &'a str,
    sku: Option<&'a str>,
    unit_subtotal: Decimal,
    total: Decimal,
}

impl<'a> Baseline<'a> {
    fn of(order: &'a Order, item: &'a LineItem) -> Self {
        Self {
            currency: &order.currency,
            sku: item.sku.as_deref(),
            unit_subtotal: item.subtotal,
            total: order.total,
        }
    }

    fn same_product(&self, order: &Order, item: &LineItem) -> bool {
        self.currency == order.currency && self.sku == item.sku.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    Overcharge2022,
    VatInclusive,
    Unknown,
}

#[derive(Debug, Default)]
struct Totals {
    anomalies: usize,
    overcharge_2022: Decimal,
    vat_inclusive: Decimal,
    unknown: Decimal,
}

/// Classify a subscription's unit-price history.
///
/// Returns `Ok(None)` when no anomaly is found (including an empty or
/// single-order history). Subscriptions with an order that does not carry
/// exactly one line item are rejected as unsupported.
pub fn classify(
    subscription: &Subscription,
    options: &ClassifyOptions,
) -> Result<Option<ClassificationRecord>, CoreError> {
    let items = single_line_items(subscription)?;
    let mut history = subscription.orders.iter().zip(items);

    let Some((first, first_item)) = history.next() else {
        return Ok(None);
    };
    let mut baseline = Baseline::of(first, first_item);
    let mut totals = Totals::default();

    for (order, item) in history {
        if !order.completed {
            continue;
        }

        // New currency or product: a legitimate re-pricing.
        if !baseline.same_product(order, item) {
            baseline = Baseline::of(order, item);
            continue;
        }

        if item.subtotal == baseline.unit_subtotal {
            continue;
        }

        // Anomalies never move the baseline.
        let cause = attribute(order, item, &baseline, options);
        let amount = match cause {
            Cause::Overcharge2022 => {
                let amount = order.total - baseline.total;
                totals.overcharge_2022 += amount;
                amount
            }
            Cause::VatInclusive => {
                let amount = baseline.unit_subtotal - item.subtotal;
                totals.vat_inclusive += amount;
                amount
            }
            Cause::Unknown => {
                let amount = baseline.unit_subtotal - item.subtotal;
                totals.unknown += amount;
                amount
            }
        };
        totals.anomalies += 1;

        tracing::debug!(
            subscription = %subscription.reference,
            changed = %order.changed,
            previous_unit = %baseline.unit_subtotal,
            unit = %item.subtotal,
            cause = ?cause,
            %amount,
            "unit price changed"
        );
    }

    if totals.anomalies == 0 {
        return Ok(None);
    }

    Ok(Some(ClassificationRecord {
        subscription: subscription.reference.clone(),
        currency: baseline.currency.to_string(),
        overcharge_2022: round_amount(totals.overcharge_2022),
        vat_inclusive: round_amount(totals.vat_inclusive),
        unknown: round_amount(totals.unknown),
    }))
}

/// Pick the cause of an anomalous order. First match wins.
fn attribute(
    order: &Order,
    item: &LineItem,
    baseline: &Baseline<'_>,
    options: &ClassifyOptions,
) -> Cause {
    if order.changed >= options.overcharge_since && order.total > baseline.total {
        Cause::Overcharge2022
    } else if item.subtotal + order.tax == baseline.total {
        // The lower unit price plus tax rebuilds the old VAT-exclusive total.
        Cause::VatInclusive
    } else {
        Cause::Unknown
    }
}

/// The line item of every order, or the reason the history is unsupported.
fn single_line_items(subscription: &Subscription) -> Result<Vec<&LineItem>, CoreError> {
    subscription
        .orders
        .iter()
        .map(|order| match order.items.as_slice() {
            [item] => Ok(item),
            [] => Err(CoreError::NoLineItems {
                subscription: subscription.reference.clone(),
            }),
            items => Err(CoreError::MultipleLineItems {
                subscription: subscription.reference.clone(),
                count: items.len(),
            }),
        })
        .collect()
}

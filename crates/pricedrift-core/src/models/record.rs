use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::links;

/// Per-subscription outcome of the drift classifier.
///
/// Only produced for subscriptions with at least one anomalous order.
/// Amounts are rounded to two decimal places; the VAT and unknown
/// amounts may be negative (undercharge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub subscription: String,
    pub currency: String,
    pub overcharge_2022: Decimal,
    pub vat_inclusive: Decimal,
    pub unknown: Decimal,
}

impl ClassificationRecord {
    pub fn admin_link(&self) -> String {
        links::admin_link(&self.subscription)
    }

    pub fn has_overcharge(&self) -> bool {
        self.overcharge_2022 > Decimal::ZERO
    }

    pub fn has_vat_inclusive(&self) -> bool {
        self.vat_inclusive > Decimal::ZERO
    }
}

//! Row layouts of the three report files.

use pricedrift_core::models::record::ClassificationRecord;
use pricedrift_core::money::format_amount;
use serde::Serialize;

pub const ALL_ISSUES_HEADER: [&str; 7] = [
    "counter",
    "subscription ref",
    "currency",
    "amount overcharged",
    "cost due to VAT inclusive unit price",
    "cost due to unknown issue",
    "link",
];

pub const OVERCHARGE_HEADER: [&str; 5] = [
    "counter",
    "subscription",
    "amount overcharged",
    "currency",
    "link",
];

pub const VAT_INCLUSIVE_HEADER: [&str; 5] = [
    "counter",
    "subscription",
    "cost to vendor",
    "currency",
    "link",
];

#[derive(Debug, Serialize)]
pub struct AllIssuesRow<'a> {
    pub counter: u64,
    pub subscription: &'a str,
    pub currency: &'a str,
    pub overcharged: String,
    pub vat_inclusive: String,
    pub unknown: String,
    pub link: String,
}

/// Shared layout of the overcharge and VAT-inclusive files.
#[derive(Debug, Serialize)]
pub struct AmountRow<'a> {
    pub counter: u64,
    pub subscription: &'a str,
    pub amount: String,
    pub currency: &'a str,
    pub link: String,
}

impl<'a> AllIssuesRow<'a> {
    pub fn new(counter: u64, record: &'a ClassificationRecord) -> Self {
        Self {
            counter,
            subscription: &record.subscription,
            currency: &record.currency,
            overcharged: format_amount(record.overcharge_2022),
            vat_inclusive: format_amount(record.vat_inclusive),
            unknown: format_amount(record.unknown),
            link: record.admin_link(),
        }
    }
}

impl<'a> AmountRow<'a> {
    pub fn overcharge(counter: u64, record: &'a ClassificationRecord) -> Self {
        Self::with_amount(counter, record, format_amount(record.overcharge_2022))
    }

    pub fn vat_inclusive(counter: u64, record: &'a ClassificationRecord) -> Self {
        Self::with_amount(counter, record, format_amount(record.vat_inclusive))
    }

    fn with_amount(counter: u64, record: &'a ClassificationRecord, amount: String) -> Self {
        Self {
            counter,
            subscription: &record.subscription,
            amount,
            currency: &record.currency,
            link: record.admin_link(),
        }
    }
}

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use pricedrift_core::models::record::ClassificationRecord;

use crate::error::ReportError;
use crate::rows::{
    ALL_ISSUES_HEADER, AllIssuesRow, AmountRow, OVERCHARGE_HEADER, VAT_INCLUSIVE_HEADER,
};
use crate::{ALL_ISSUES_FILE, OVERCHARGE_FILE, VAT_INCLUSIVE_FILE};

/// Rows written so far to each report. Doubles as the row numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub affected: u64,
    pub overcharge: u64,
    pub vat_inclusive: u64,
}

/// Row numbers assigned to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowNumbers {
    pub all: u64,
    pub overcharge: Option<u64>,
    pub vat_inclusive: Option<u64>,
}

/// End-of-run totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub counters: RunCounters,
    /// Subscriptions whose history was classified.
    pub scanned: u64,
    /// Subscriptions rejected as unsupported (multi-item orders).
    pub skipped: u64,
    /// Subscriptions whose history could not be fetched.
    pub failed: u64,
}

/// Owns the three report streams and the run counters.
///
/// Every stream is flushed after each record so the files can be
/// inspected while a long scan is still running.
pub struct Aggregator<W: Write> {
    all: csv::Writer<W>,
    overcharge: csv::Writer<W>,
    vat_inclusive: csv::Writer<W>,
    summary: RunSummary,
}

impl Aggregator<File> {
    /// Create (or truncate) the three report files in `dir`.
    pub fn create(dir: &Path) -> Result<Self, ReportError> {
        let open = |name: &str| {
            let path = dir.join(name);
            File::create(&path).map_err(|source| ReportError::Create { path, source })
        };

        let aggregator = Self::new(
            open(ALL_ISSUES_FILE)?,
            open(OVERCHARGE_FILE)?,
            open(VAT_INCLUSIVE_FILE)?,
        )?;
        tracing::debug!(dir = %dir.display(), "report files created");
        Ok(aggregator)
    }
}

impl<W: Write> Aggregator<W> {
    /// Wrap three writers and emit the header rows.
    pub fn new(all: W, overcharge: W, vat_inclusive: W) -> Result<Self, ReportError> {
        let mut aggregator = Self {
            all: writer(all),
            overcharge: writer(overcharge),
            vat_inclusive: writer(vat_inclusive),
            summary: RunSummary::default(),
        };
        aggregator.all.write_record(ALL_ISSUES_HEADER)?;
        aggregator.overcharge.write_record(OVERCHARGE_HEADER)?;
        aggregator.vat_inclusive.write_record(VAT_INCLUSIVE_HEADER)?;
        aggregator.flush()?;
        Ok(aggregator)
    }

    /// Number and append one affected subscription.
    ///
    /// The record always lands in the all-issues report; it also lands in
    /// the overcharge and VAT reports when that amount is positive.
    pub fn record(&mut self, record: &ClassificationRecord) -> Result<RowNumbers, ReportError> {
        let counters = &mut self.summary.counters;

        counters.affected += 1;
        let all = counters.affected;
        self.all.serialize(AllIssuesRow::new(all, record))?;

        let overcharge = if record.has_overcharge() {
            counters.overcharge += 1;
            self.overcharge
                .serialize(AmountRow::overcharge(counters.overcharge, record))?;
            Some(counters.overcharge)
        } else {
            None
        };

        let vat_inclusive = if record.has_vat_inclusive() {
            counters.vat_inclusive += 1;
            self.vat_inclusive
                .serialize(AmountRow::vat_inclusive(counters.vat_inclusive, record))?;
            Some(counters.vat_inclusive)
        } else {
            None
        };

        self.flush()?;

        tracing::info!(
            counter = all,
            subscription = %record.subscription,
            "issue found with subscription"
        );

        Ok(RowNumbers {
            all,
            overcharge,
            vat_inclusive,
        })
    }

    pub fn note_scanned(&mut self) {
        self.summary.scanned += 1;
    }

    pub fn note_skipped(&mut self) {
        self.summary.skipped += 1;
    }

    pub fn note_failed(&mut self) {
        self.summary.failed += 1;
    }

    pub fn counters(&self) -> RunCounters {
        self.summary.counters
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn flush(&mut self) -> Result<(), ReportError> {
        self.all.flush()?;
        self.overcharge.flush()?;
        self.vat_inclusive.flush()?;
        Ok(())
    }

    /// Flush and close all streams.
    pub fn finish(self) -> Result<RunSummary, ReportError> {
        let (summary, _writers) = self.into_parts()?;
        Ok(summary)
    }

    /// Flush and hand back the underlying writers.
    pub fn into_parts(self) -> Result<(RunSummary, [W; 3]), ReportError> {
        let writers = [
            self.all.into_inner()?,
            self.overcharge.into_inner()?,
            self.vat_inclusive.into_inner()?,
        ];
        Ok((self.summary, writers))
    }
}

fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new().has_headers(false).from_writer(inner)
}

use std::io::Write;

use futures::future::join_all;
use pricedrift_core::models::subscription::Subscription;
use pricedrift_core::{ClassifyOptions, classify};
use pricedrift_fastspring::subscriptions::DEFAULT_PAGE_SIZE;
use pricedrift_fastspring::{ApiError, DateWindow, SubscriptionSource};
use pricedrift_report::{Aggregator, RunSummary};

use crate::error::ScanError;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub window: DateWindow,
    /// Subscriptions per listing page; sent to the API as the page limit.
    pub page_size: u64,
    pub classify: ClassifyOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            window: DateWindow::default(),
            page_size: DEFAULT_PAGE_SIZE,
            classify: ClassifyOptions::default(),
        }
    }
}

/// Number of listing pages needed for `total` subscriptions.
pub fn page_count(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Audit every subscription in the window.
///
/// Pages are walked from the last (oldest subscriptions) to the first so
/// the reports fill oldest-first. All histories of a page are fetched
/// concurrently and joined before the next page is requested, so nothing
/// is still in flight when this returns.
///
/// A failed count or page listing ends the run. A subscription whose
/// history cannot be fetched, or whose orders are unsupported, is logged
/// and skipped.
pub async fn run_scan<S, W>(
    source: &S,
    aggregator: &mut Aggregator<W>,
    options: &ScanOptions,
) -> Result<RunSummary, ScanError>
where
    S: SubscriptionSource + ?Sized,
    W: Write,
{
    let total = source
        .count(options.window)
        .await
        .map_err(ScanError::Count)?;
    let pages = page_count(total, options.page_size);
    tracing::info!(total, pages, "subscriptions to analyze");

    for page in (1..=pages).rev() {
        tracing::info!("fetching page {page} of {pages}");
        let ids = source
            .page(options.window, page, options.page_size)
            .await
            .map_err(|source| ScanError::Page { page, source })?;

        let histories = join_all(ids.iter().map(|id| source.history(id))).await;
        for (id, history) in ids.iter().zip(histories) {
            settle(id, history, aggregator, &options.classify)?;
        }
    }

    Ok(aggregator.summary())
}

/// Classify one fetched history and hand any finding to the aggregator.
fn settle<W: Write>(
    id: &str,
    history: Result<Subscription, ApiError>,
    aggregator: &mut Aggregator<W>,
    options: &ClassifyOptions,
) -> Result<(), ScanError> {
    let subscription = match history {
        Ok(subscription) => subscription,
        Err(e) => {
            tracing::warn!(subscription = %id, error = %e, "could not fetch order history, skipping");
            aggregator.note_failed();
            return Ok(());
        }
    };

    match classify(&subscription, options) {
        Ok(Some(record)) => {
            aggregator.note_scanned();
            aggregator.record(&record)?;
        }
        Ok(None) => aggregator.note_scanned(),
        Err(e) => {
            tracing::warn!(subscription = %e.subscription(), "{e}");
            aggregator.note_skipped();
        }
    }
    Ok(())
}

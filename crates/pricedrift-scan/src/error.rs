use pricedrift_fastspring::ApiError;
use pricedrift_report::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not count subscriptions: {0}")]
    Count(#[source] ApiError),

    #[error("could not list subscriptions page {page}: {source}")]
    Page { page: u64, source: ApiError },

    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

use std::collections::HashMap;
use std::sync::Mutex;

use pricedrift_core::models::order::{LineItem, Order};
use pricedrift_core::models::subscription::Subscription;
use pricedrift_fastspring::{ApiError, BoxFuture, DateWindow, SubscriptionSource};
use pricedrift_report::{Aggregator, RunCounters};
use pricedrift_scan::{ScanError, ScanOptions, page_count, run_scan};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// In-memory stand-in for the subscriptions API.
#[derive(Default)]
struct FakeSource {
    total: u64,
    fail_count: bool,
    fail_page: Option<u64>,
    /// Index 0 is page 1 (newest subscriptions).
    pages: Vec<Vec<String>>,
    histories: HashMap<String, Subscription>,
    requested_pages: Mutex<Vec<u64>>,
    requested_sizes: Mutex<Vec<u64>>,
}

impl FakeSource {
    fn with_pages(pages: Vec<Vec<&str>>) -> Self {
        let pages: Vec<Vec<String>> = pages
            .into_iter()
            .map(|ids| ids.into_iter().map(str::to_string).collect())
            .collect();
        Self {
            total: pages.iter().map(|p| p.len() as u64).sum(),
            pages,
            ..Self::default()
        }
    }

    fn with_history(mut self, subscription: Subscription) -> Self {
        self.histories
            .insert(subscription.reference.clone(), subscription);
        self
    }

    fn requested_pages(&self) -> Vec<u64> {
        self.requested_pages.lock().unwrap().clone()
    }

    fn requested_sizes(&self) -> Vec<u64> {
        self.requested_sizes.lock().unwrap().clone()
    }
}

impl SubscriptionSource for FakeSource {
    fn count(&self, _window: DateWindow) -> BoxFuture<'_, Result<u64, ApiError>> {
        Box::pin(async move {
            if self.fail_count {
                Err(ApiError::Unauthorized { status: 401 })
            } else {
                Ok(self.total)
            }
        })
    }

    fn page(
        &self,
        _window: DateWindow,
        page: u64,
        page_size: u64,
    ) -> BoxFuture<'_, Result<Vec<String>, ApiError>> {
        Box::pin(async move {
            self.requested_pages.lock().unwrap().push(page);
            self.requested_sizes.lock().unwrap().push(page_size);
            if self.fail_page == Some(page) {
                return Err(ApiError::Status {
                    status: 500,
                    path: "subscriptions".into(),
                });
            }
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn history<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Subscription, ApiError>> {
        Box::pin(async move {
            self.histories
                .get(id)
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    path: format!("subscriptions/{id}/entries"),
                })
        })
    }
}

fn order(changed: &str, subtotal: Decimal) -> Order {
    Order {
        completed: true,
        changed: changed.parse().unwrap(),
        currency: "USD".into(),
        total: subtotal,
        tax: Decimal::ZERO,
        items: vec![LineItem {
            sku: Some("pro".into()),
            subtotal,
            subscription: None,
        }],
    }
}

fn steady(id: &str) -> Subscription {
    Subscription::new(
        id,
        vec![
            order("2021-01-01T00:00:00Z", dec!(10)),
            order("2021-02-01T00:00:00Z", dec!(10)),
        ],
    )
}

fn overcharged(id: &str) -> Subscription {
    Subscription::new(
        id,
        vec![
            order("2021-06-01T00:00:00Z", dec!(10)),
            order("2022-04-01T00:00:00Z", dec!(15)),
        ],
    )
}

fn bundled(id: &str) -> Subscription {
    let mut first = order("2021-01-01T00:00:00Z", dec!(10));
    first.items.push(first.items[0].clone());
    Subscription::new(id, vec![first, order("2022-04-01T00:00:00Z", dec!(15))])
}

fn options(page_size: u64) -> ScanOptions {
    ScanOptions {
        page_size,
        ..ScanOptions::default()
    }
}

fn buffers() -> Aggregator<Vec<u8>> {
    Aggregator::new(Vec::new(), Vec::new(), Vec::new()).unwrap()
}

fn data_rows(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(0, 50), 0);
    assert_eq!(page_count(1, 50), 1);
    assert_eq!(page_count(50, 50), 1);
    assert_eq!(page_count(51, 50), 2);
    assert_eq!(page_count(10, 0), 0);
}

#[tokio::test]
async fn pages_are_walked_oldest_first() {
    let source = FakeSource::with_pages(vec![vec!["new"], vec!["mid"], vec!["old"]])
        .with_history(overcharged("new"))
        .with_history(overcharged("mid"))
        .with_history(overcharged("old"));
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &options(1))
        .await
        .unwrap();

    assert_eq!(source.requested_pages(), vec![3, 2, 1]);
    assert_eq!(summary.counters.affected, 3);

    let (_, [all, _, _]) = aggregator.into_parts().unwrap();
    let subscriptions: Vec<String> = data_rows(&all)
        .iter()
        .map(|row| row.split(',').nth(1).unwrap().to_string())
        .collect();
    assert_eq!(subscriptions, vec!["old", "mid", "new"]);
}

#[tokio::test]
async fn page_size_is_forwarded_with_every_listing_request() {
    let source = FakeSource::with_pages(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]])
        .with_history(steady("a"))
        .with_history(steady("b"))
        .with_history(steady("c"))
        .with_history(steady("d"))
        .with_history(steady("e"));
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &options(2))
        .await
        .unwrap();

    assert_eq!(source.requested_pages(), vec![3, 2, 1]);
    assert_eq!(source.requested_sizes(), vec![2, 2, 2]);
    assert_eq!(summary.scanned, 5);
}

#[tokio::test]
async fn clean_subscriptions_produce_no_rows() {
    let source = FakeSource::with_pages(vec![vec!["a", "b"]])
        .with_history(steady("a"))
        .with_history(steady("b"));
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &options(50))
        .await
        .unwrap();

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.counters, RunCounters::default());
}

#[tokio::test]
async fn unsupported_subscriptions_are_skipped() {
    let source = FakeSource::with_pages(vec![vec!["bundle", "single"]])
        .with_history(bundled("bundle"))
        .with_history(overcharged("single"));
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &options(50))
        .await
        .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.counters.affected, 1);

    let (_, [all, overcharge, vat]) = aggregator.into_parts().unwrap();
    for rows in [data_rows(&all), data_rows(&overcharge), data_rows(&vat)] {
        assert!(rows.iter().all(|row| !row.contains("bundle")));
    }
}

#[tokio::test]
async fn failed_history_does_not_stop_the_run() {
    let source = FakeSource::with_pages(vec![vec!["missing", "present"]])
        .with_history(overcharged("present"));
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &options(50))
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.counters.affected, 1);
    assert_eq!(summary.counters.overcharge, 1);
}

#[tokio::test]
async fn count_failure_is_fatal() {
    let source = FakeSource {
        fail_count: true,
        ..FakeSource::with_pages(vec![vec!["a"]])
    };
    let mut aggregator = buffers();

    let err = run_scan(&source, &mut aggregator, &options(50))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScanError::Count(ApiError::Unauthorized { status: 401 })
    ));
    assert!(source.requested_pages().is_empty());
}

#[tokio::test]
async fn page_failure_is_fatal() {
    let source = FakeSource {
        fail_page: Some(2),
        ..FakeSource::with_pages(vec![vec!["a"], vec!["b"], vec!["c"]])
    }
    .with_history(overcharged("c"));
    let mut aggregator = buffers();

    let err = run_scan(&source, &mut aggregator, &options(1))
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Page { page: 2, .. }));
    assert_eq!(source.requested_pages(), vec![3, 2]);
    // Findings from the pages before the failure are already written.
    assert_eq!(aggregator.counters().affected, 1);
}

#[tokio::test]
async fn empty_population_finishes_cleanly() {
    let source = FakeSource::default();
    let mut aggregator = buffers();

    let summary = run_scan(&source, &mut aggregator, &ScanOptions::default())
        .await
        .unwrap();

    assert_eq!(summary, Default::default());
    assert!(source.requested_pages().is_empty());
}

use std::future::Future;
use std::pin::Pin;

use jiff::civil::{Date, date};
use pricedrift_core::models::subscription::Subscription;

use crate::client::FastSpringClient;
use crate::error::ApiError;
use crate::subscriptions;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Creation-date range of the subscriptions to audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub begin: Date,
    pub end: Date,
}

impl Default for DateWindow {
    /// Subscriptions created from October 2009 up to mid-October 2022.
    fn default() -> Self {
        Self {
            begin: date(2009, 10, 1),
            end: date(2022, 10, 15),
        }
    }
}

/// Where subscription listings and histories come from.
///
/// Methods return boxed futures for dyn compatibility.
pub trait SubscriptionSource: Send + Sync {
    /// Total subscriptions in the window.
    fn count(&self, window: DateWindow) -> BoxFuture<'_, Result<u64, ApiError>>;

    /// Subscription ids on a 1-based page of `page_size` entries; page 1
    /// holds the newest.
    fn page(
        &self,
        window: DateWindow,
        page: u64,
        page_size: u64,
    ) -> BoxFuture<'_, Result<Vec<String>, ApiError>>;

    /// Order history of one subscription, oldest order first.
    fn history<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Subscription, ApiError>>;
}

impl SubscriptionSource for FastSpringClient {
    fn count(&self, window: DateWindow) -> BoxFuture<'_, Result<u64, ApiError>> {
        Box::pin(subscriptions::count_subscriptions(self, window))
    }

    fn page(
        &self,
        window: DateWindow,
        page: u64,
        page_size: u64,
    ) -> BoxFuture<'_, Result<Vec<String>, ApiError>> {
        Box::pin(subscriptions::list_subscriptions(
            self, window, page, page_size,
        ))
    }

    fn history<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Subscription, ApiError>> {
        Box::pin(subscriptions::subscription_history(self, id))
    }
}

//! Subscription endpoints used by the audit.

use pricedrift_core::models::subscription::Subscription;

use crate::client::FastSpringClient;
use crate::error::ApiError;
use crate::source::DateWindow;
use crate::wire;

const SUBSCRIPTIONS: &str = "subscriptions";

/// Page size the API serves when no `limit` is given.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Query string of a `GET /subscriptions` listing request.
pub fn list_query(window: DateWindow, page: u64, limit: u64) -> Vec<(&'static str, String)> {
    vec![
        ("begin", window.begin.to_string()),
        ("end", window.end.to_string()),
        ("event", "created".to_string()),
        ("scope", "live".to_string()),
        ("page", page.to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Total number of live subscriptions created inside `window`.
pub async fn count_subscriptions(
    client: &FastSpringClient,
    window: DateWindow,
) -> Result<u64, ApiError> {
    let query = list_query(window, 1, DEFAULT_PAGE_SIZE);
    let body = client.get(SUBSCRIPTIONS, &query).await?;
    let page = wire::parse_page(SUBSCRIPTIONS, &body)?;
    Ok(page.total)
}

/// Subscription ids on one page of the listing (1-based, newest first).
///
/// `page_size` is sent as the listing `limit`, so page numbers line up
/// with the page count the caller derived from it.
pub async fn list_subscriptions(
    client: &FastSpringClient,
    window: DateWindow,
    page: u64,
    page_size: u64,
) -> Result<Vec<String>, ApiError> {
    let query = list_query(window, page, page_size);
    let body = client.get(SUBSCRIPTIONS, &query).await?;
    let page = wire::parse_page(SUBSCRIPTIONS, &body)?;
    Ok(page
        .subscriptions
        .into_iter()
        .map(wire::SubscriptionId::into_id)
        .collect())
}

/// Full order history of one subscription, oldest order first.
pub async fn subscription_history(
    client: &FastSpringClient,
    id: &str,
) -> Result<Subscription, ApiError> {
    let path = format!("{SUBSCRIPTIONS}/{id}/entries");
    let body = client.get(&path, &[]).await?;
    wire::parse_history(id, &path, &body)
}

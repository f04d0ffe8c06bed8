//! Admin console URL conventions.

const ADMIN_BASE: &str = "https://app.fastspring.com/subscription/home.xml";

/// Deep link to a subscription's page in the merchant admin console.
pub fn admin_link(reference: &str) -> String {
    format!("{ADMIN_BASE}?mRef=Subscription%3A{reference}")
}

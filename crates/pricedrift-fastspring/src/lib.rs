//! pricedrift-fastspring
//!
//! Read-only access to the FastSpring subscriptions API. Thin wrapper
//! around `reqwest`: listing, order histories, Basic auth and retries.

pub mod client;
pub mod error;
pub mod retry;
pub mod source;
pub mod subscriptions;
pub mod wire;

pub use crate::client::{ClientConfig, Credentials, FastSpringClient};
pub use crate::error::ApiError;
pub use crate::retry::RetryPolicy;
pub use crate::source::{BoxFuture, DateWindow, SubscriptionSource};

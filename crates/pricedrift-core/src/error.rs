use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("subscription {subscription} has more than 1 item ({count}), unable to analyze")]
    MultipleLineItems { subscription: String, count: usize },

    #[error("subscription {subscription} has an order without line items, unable to analyze")]
    NoLineItems { subscription: String },
}

impl CoreError {
    /// The subscription reference the rejection applies to.
    pub fn subscription(&self) -> &str {
        match self {
            Self::MultipleLineItems { subscription, .. } | Self::NoLineItems { subscription } => {
                subscription
            }
        }
    }
}

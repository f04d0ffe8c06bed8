use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("FastSpring rejected the API credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("FastSpring returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("unexpected response body from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("order {order} has an invalid change time: {message}")]
    Timestamp { order: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether repeating the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

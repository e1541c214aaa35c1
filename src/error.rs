#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Network-level failure: unreachable host, timeout, connection reset.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success HTTP status. The body is
    /// kept as raw text; it is not guaranteed to be JSON.
    #[error("remote error: HTTP {status}")]
    Remote { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or malformed user input, rejected before any request is made.
    #[error("invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

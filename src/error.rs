use thiserror::Error;

/// Errors produced while resolving configuration or building, issuing, and
/// decoding tracking-server requests.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing tracking-server configuration. Raised before any
    /// request is sent and fatal to the whole run.
    #[error("configuration error: {0}")]
    Config(String),

    /// One-time scenario setup failed. Fatal to the whole run: there is no
    /// experiment to attach runs to.
    #[error("scenario setup failed: {0}")]
    Setup(#[source] Box<Error>),

    /// Transport-level failure issuing a request.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("tracking server returned HTTP {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A response body could not be parsed as JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// None of the tolerated field names were present in a response.
    #[error("response field missing, tried: {candidates}")]
    MissingField { candidates: String },
}

impl Error {
    /// Whether this error aborts the whole load-test run rather than a
    /// single iteration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Setup(_))
    }
}

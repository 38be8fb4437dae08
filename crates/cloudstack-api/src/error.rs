//! Error types for management API operations.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the management server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request could not be signed.
    #[error("signing error: {0}")]
    Signing(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a parseable API error body.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The server answered with an API error envelope.
    #[error("{command} failed with error {code}: {text}")]
    Server {
        /// Command that was issued.
        command: String,
        /// `errorcode` from the envelope.
        code: u32,
        /// `errortext` from the envelope.
        text: String,
    },

    /// A response did not contain an expected field.
    #[error("{context}: response has no `{field}` field")]
    MissingField {
        /// Command or job the response belongs to.
        context: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// An async job finished with a failure status.
    #[error("job {job_id} failed with error {code}: {text}")]
    JobFailed {
        /// Job identifier.
        job_id: String,
        /// Error code reported by the job.
        code: u32,
        /// Error text reported by the job.
        text: String,
    },

    /// An async job did not finish within the polling budget.
    #[error("job {job_id} still pending after {attempts} queries")]
    JobTimeout {
        /// Job identifier.
        job_id: String,
        /// Number of status queries issued.
        attempts: u32,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns true if the server reported an API-level error.
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns true if an async job failed or timed out.
    #[must_use]
    pub const fn is_job_error(&self) -> bool {
        matches!(self, Self::JobFailed { .. } | Self::JobTimeout { .. })
    }
}

use thiserror::Error;

/// Top-level error type for the `remon-api` crate.
///
/// Covers every failure mode of the configuration service and release feed
/// clients. `remon-core` maps these into operation-level diagnostics for the
/// state store; this crate never interprets them beyond classification.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Bearer token contains bytes that cannot appear in an HTTP header.
    #[error("Access token is not a valid header value")]
    InvalidToken,

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success response from the service, with whatever diagnostic
    /// message the body carried.
    #[error("Service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }
}

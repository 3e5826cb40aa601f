// ── Core error types ──
//
// Consumer-facing errors from remon-core. Remote failures that happen
// inside an epic never take this path; they land in the store as
// `ErrorInfo` for views to render.

use thiserror::Error;

/// Top-level error type for `remon-core`.
///
/// Epic failures never surface through this type: they are caught at the
/// epic boundary and registered in the store as `ErrorInfo`. This enum
/// covers the synchronous edges only.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure from the remote service client.
    #[error(transparent)]
    Service(#[from] remon_api::Error),

    /// Local validation rejected the input; nothing was dispatched and no
    /// request was made.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The console has been shut down and accepts no further actions.
    #[error("Console is closed")]
    ConsoleClosed,
}

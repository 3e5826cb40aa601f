// ── Per-operation pending/error bookkeeping ──
//
// One shared transition table covers every remote operation: a request
// clears the previous error (and raises `pending` for fetchable
// operations), the matching success clears both, the matching failure
// records an `ErrorInfo` snapshot. State must stay `Clone + PartialEq`,
// so failures are rendered to plain text at the epic boundary instead of
// storing the source error.

use std::collections::BTreeMap;

use super::action::Operation;

/// Broad failure classification carried alongside the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure: DNS, connect, timeout, TLS.
    Transport,
    /// The service answered with a non-success status.
    Api,
    /// The service answered with a body the client could not read.
    Deserialization,
    Other,
}

/// Display-ready snapshot of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub(crate) fn other(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: message.into(),
        }
    }
}

impl From<&remon_api::Error> for ErrorInfo {
    fn from(err: &remon_api::Error) -> Self {
        let kind = match err {
            remon_api::Error::Transport(_) => ErrorKind::Transport,
            remon_api::Error::Api { .. } => ErrorKind::Api,
            remon_api::Error::Deserialization { .. } => ErrorKind::Deserialization,
            remon_api::Error::InvalidUrl(_) | remon_api::Error::InvalidToken => ErrorKind::Other,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Live status of one remote operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStatus {
    pub pending: bool,
    pub error: Option<ErrorInfo>,
}

/// Status of every remote operation, keyed by `Operation`.
///
/// Missing entries read as the idle status; the map only grows when an
/// operation actually runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: BTreeMap<Operation, OperationStatus>,
}

impl StatusMap {
    pub fn get(&self, operation: Operation) -> OperationStatus {
        self.entries.get(&operation).cloned().unwrap_or_default()
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        self.entries.get(&operation).is_some_and(|s| s.pending)
    }

    pub fn error(&self, operation: Operation) -> Option<&ErrorInfo> {
        self.entries.get(&operation).and_then(|s| s.error.as_ref())
    }

    /// Any operation currently in flight.
    pub fn any_pending(&self) -> bool {
        self.entries.values().any(|s| s.pending)
    }

    pub(crate) fn begin(&mut self, operation: Operation) {
        let status = self.entries.entry(operation).or_default();
        status.error = None;
        if operation.is_fetchable() {
            status.pending = true;
        }
    }

    pub(crate) fn settle_ok(&mut self, operation: Operation) {
        let status = self.entries.entry(operation).or_default();
        status.pending = false;
        status.error = None;
    }

    pub(crate) fn settle_err(&mut self, operation: Operation, error: ErrorInfo) {
        let status = self.entries.entry(operation).or_default();
        status.pending = false;
        status.error = Some(error);
    }
}

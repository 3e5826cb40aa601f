// ── State store ──
//
// Versioned state container mutated exclusively by pure reducers over a
// closed action type.

mod action;
mod reduce;
mod state;
mod status;

pub use action::{Action, Operation};
pub use reduce::reduce;
pub use state::{AppState, Store};
pub use status::{ErrorInfo, ErrorKind, OperationStatus, StatusMap};

pub(crate) use action::Epic;

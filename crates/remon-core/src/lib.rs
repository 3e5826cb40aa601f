// remon-core: State container and orchestration for the Remon console.
//
// Wraps remon-api in a redux-style data layer: a versioned store mutated
// by pure reducers, epics that turn request actions into exactly one
// completion each, and memoized selectors for presentation code. The
// `Console` ties it together on a tokio runtime.

pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod memo;
pub mod model;
pub mod selector;
pub mod store;

mod epic;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, DEFAULT_RELEASE_FEED_URL};
pub use console::Console;
pub use error::Error;
pub use memo::{DepKey, Memo};
pub use selector::Selectors;
pub use store::{
    Action, AppState, ErrorInfo, ErrorKind, Operation, OperationStatus, StatusMap, Store, reduce,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Branding, Condition, ConditionOperator, DEFAULT_APPLICATION_NAME, DeviceGroup,
    DeviceGroupDraft, LogoDraft, ReleaseInfo, Theme,
};

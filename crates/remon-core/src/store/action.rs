// ── Actions and operations ──
//
// Every state change in the console is described by one `Action` variant.
// Request actions trigger an epic, local actions only touch state, and
// completion actions are emitted by epics when their remote call settles.
// Reducers match the enum exhaustively, so adding a variant is a
// compile-time event, not a runtime surprise.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use strum::{Display, EnumString};

use super::status::ErrorInfo;
use crate::model::{Branding, DeviceGroup, DeviceGroupDraft, LogoDraft, ReleaseInfo, Theme};

/// Every remote operation the console can run, used to key per-operation
/// pending/error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    FetchDeviceGroups,
    FetchFilters,
    FetchMapsKey,
    FetchLogo,
    SetLogo,
    InsertDeviceGroup,
    UpdateDeviceGroup,
    DeleteDeviceGroup,
    FetchRelease,
}

impl Operation {
    /// Whether this operation participates in `pending` tracking.
    ///
    /// Group writes and the release lookup only record errors; the console
    /// never renders a spinner for them.
    pub fn is_fetchable(self) -> bool {
        matches!(
            self,
            Self::FetchDeviceGroups
                | Self::FetchFilters
                | Self::FetchMapsKey
                | Self::FetchLogo
                | Self::SetLogo
        )
    }
}

/// One console intent or completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Requests (each triggers an epic) ─────────────────────────────
    /// Fan-out on console start: resets the selection and dispatches the
    /// five independent fetches, without waiting for any of them.
    Initialize,
    FetchDeviceGroups,
    FetchFilters,
    FetchMapsKey,
    FetchLogo,
    FetchRelease,
    InsertDeviceGroup {
        draft: DeviceGroupDraft,
    },
    UpdateDeviceGroup {
        id: String,
        draft: DeviceGroupDraft,
        e_tag: Option<String>,
    },
    DeleteDeviceGroup {
        id: String,
    },
    SetLogo {
        draft: LogoDraft,
    },

    // ── Local actions (state only) ───────────────────────────────────
    SelectDeviceGroup {
        id: Option<String>,
    },
    SetTheme {
        theme: Theme,
    },

    // ── Completions (emitted by epics) ───────────────────────────────
    DeviceGroupsFetched {
        groups: BTreeMap<String, DeviceGroup>,
        fetched_at: DateTime<Utc>,
    },
    DeviceGroupInserted {
        group: DeviceGroup,
    },
    /// Upsert of one or more fully-formed records; the update epic emits a
    /// single-element list.
    DeviceGroupsUpserted {
        groups: Vec<DeviceGroup>,
    },
    DeviceGroupDeleted {
        id: String,
    },
    FiltersFetched {
        filters: Value,
    },
    MapsKeyFetched {
        key: Option<String>,
    },
    LogoFetched {
        branding: Branding,
    },
    LogoUpdated {
        branding: Branding,
    },
    ReleaseFetched {
        release: ReleaseInfo,
    },
    OperationFailed {
        operation: Operation,
        error: ErrorInfo,
    },
}

impl Action {
    /// The remote operation this action initiates, if any.
    pub fn request_of(&self) -> Option<Operation> {
        match self {
            Self::FetchDeviceGroups => Some(Operation::FetchDeviceGroups),
            Self::FetchFilters => Some(Operation::FetchFilters),
            Self::FetchMapsKey => Some(Operation::FetchMapsKey),
            Self::FetchLogo => Some(Operation::FetchLogo),
            Self::FetchRelease => Some(Operation::FetchRelease),
            Self::InsertDeviceGroup { .. } => Some(Operation::InsertDeviceGroup),
            Self::UpdateDeviceGroup { .. } => Some(Operation::UpdateDeviceGroup),
            Self::DeleteDeviceGroup { .. } => Some(Operation::DeleteDeviceGroup),
            Self::SetLogo { .. } => Some(Operation::SetLogo),
            _ => None,
        }
    }

    /// The remote operation this action completes successfully, if any.
    pub fn success_of(&self) -> Option<Operation> {
        match self {
            Self::DeviceGroupsFetched { .. } => Some(Operation::FetchDeviceGroups),
            Self::FiltersFetched { .. } => Some(Operation::FetchFilters),
            Self::MapsKeyFetched { .. } => Some(Operation::FetchMapsKey),
            Self::LogoFetched { .. } => Some(Operation::FetchLogo),
            Self::LogoUpdated { .. } => Some(Operation::SetLogo),
            Self::DeviceGroupInserted { .. } => Some(Operation::InsertDeviceGroup),
            Self::DeviceGroupsUpserted { .. } => Some(Operation::UpdateDeviceGroup),
            Self::DeviceGroupDeleted { .. } => Some(Operation::DeleteDeviceGroup),
            Self::ReleaseFetched { .. } => Some(Operation::FetchRelease),
            _ => None,
        }
    }

    /// The epic this action triggers when applied, carrying its own copy
    /// of the request payload.
    pub(crate) fn epic(&self) -> Option<Epic> {
        match self {
            Self::FetchDeviceGroups => Some(Epic::FetchDeviceGroups),
            Self::FetchFilters => Some(Epic::FetchFilters),
            Self::FetchMapsKey => Some(Epic::FetchMapsKey),
            Self::FetchLogo => Some(Epic::FetchLogo),
            Self::FetchRelease => Some(Epic::FetchRelease),
            Self::InsertDeviceGroup { draft } => Some(Epic::InsertDeviceGroup {
                draft: draft.clone(),
            }),
            Self::UpdateDeviceGroup { id, draft, e_tag } => Some(Epic::UpdateDeviceGroup {
                id: id.clone(),
                draft: draft.clone(),
                e_tag: e_tag.clone(),
            }),
            Self::DeleteDeviceGroup { id } => Some(Epic::DeleteDeviceGroup { id: id.clone() }),
            Self::SetLogo { draft } => Some(Epic::SetLogo {
                draft: draft.clone(),
            }),
            _ => None,
        }
    }
}

/// A remote call owed to a request action. Detached from the store once
/// spawned; the runner turns it into exactly one completion action.
#[derive(Debug, Clone)]
pub(crate) enum Epic {
    FetchDeviceGroups,
    FetchFilters,
    FetchMapsKey,
    FetchLogo,
    FetchRelease,
    InsertDeviceGroup {
        draft: DeviceGroupDraft,
    },
    UpdateDeviceGroup {
        id: String,
        draft: DeviceGroupDraft,
        e_tag: Option<String>,
    },
    DeleteDeviceGroup {
        id: String,
    },
    SetLogo {
        draft: LogoDraft,
    },
}

// ── Console state and its container ──

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::action::Action;
use super::reduce::reduce;
use super::status::StatusMap;
use crate::model::{Branding, DeviceGroup, ReleaseInfo, Theme};

/// Complete state of the console at one instant.
///
/// Cheap to clone: collections sit behind `Arc` and are cloned on first
/// write by the reducers, so snapshot holders are never invalidated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Normalized device-group cache, keyed by id.
    pub device_groups: Arc<BTreeMap<String, DeviceGroup>>,
    /// Always names an existing entry or is `None`; reducers enforce this
    /// on every mutation path.
    pub active_device_group_id: Option<String>,
    /// Raw device-group filters, exactly as the service returned them.
    pub device_group_filters: Arc<Value>,
    pub theme: Theme,
    pub branding: Branding,
    /// Map-provider key from the solution's theme document.
    pub maps_key: Option<String>,
    pub release: Option<ReleaseInfo>,
    /// Pending/error status per remote operation.
    pub statuses: StatusMap,
    /// When the device-group cache was last replaced wholesale.
    pub last_groups_refresh: Option<DateTime<Utc>>,
}

/// Versioned container for the console's state.
///
/// Plain and synchronous: constructed by its owner, mutated only through
/// `dispatch`, dropped when the owner is done. The `Console` wraps one of
/// these behind a single apply task; nothing else writes it.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    revision: u64,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: initial,
            revision: 0,
        }
    }

    /// Apply one action: reduce, then bump the revision.
    pub fn dispatch(&mut self, action: &Action) {
        self.state = reduce(&self.state, action);
        self.revision += 1;
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Monotone count of applied actions.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::super::action::Operation;
    use super::*;

    #[test]
    fn dispatch_applies_in_order_and_bumps_revision() {
        let mut store = Store::new(AppState::default());
        assert_eq!(store.revision(), 0);

        store.dispatch(&Action::FetchDeviceGroups);
        assert_eq!(store.revision(), 1);
        assert!(store.state().statuses.is_pending(Operation::FetchDeviceGroups));

        store.dispatch(&Action::SetTheme { theme: Theme::Light });
        assert_eq!(store.revision(), 2);
        assert_eq!(store.state().theme, Theme::Light);
    }
}

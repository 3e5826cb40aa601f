// ── Read projections over console state ──
//
// Plain selectors are free functions. Derived selectors live on a
// `Selectors` value that owns its memo cells; presentation code keeps one
// per view tree and calls it with each snapshot. Selectors never mutate
// state and never touch the network.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::memo::Memo;
use crate::model::{Branding, Condition, DeviceGroup, ReleaseInfo, Theme};
use crate::store::{AppState, ErrorInfo, Operation};

// ── Plain selectors ────────────────────────────────────────────────

pub fn pending(state: &AppState, operation: Operation) -> bool {
    state.statuses.is_pending(operation)
}

pub fn error(state: &AppState, operation: Operation) -> Option<&ErrorInfo> {
    state.statuses.error(operation)
}

pub fn theme(state: &AppState) -> Theme {
    state.theme
}

pub fn maps_key(state: &AppState) -> Option<&str> {
    state.maps_key.as_deref()
}

pub fn branding(state: &AppState) -> &Branding {
    &state.branding
}

pub fn release(state: &AppState) -> Option<&ReleaseInfo> {
    state.release.as_ref()
}

pub fn device_group_filters(state: &AppState) -> &Value {
    &state.device_group_filters
}

pub fn last_groups_refresh(state: &AppState) -> Option<DateTime<Utc>> {
    state.last_groups_refresh
}

// ── Derived selectors ──────────────────────────────────────────────

/// Memoized derived selectors.
///
/// Each cell recomputes if and only if its declared dependency's identity
/// changed; unrelated state changes hand back the cached `Arc` unchanged.
#[derive(Debug, Default)]
pub struct Selectors {
    device_groups: Memo<Arc<BTreeMap<String, DeviceGroup>>, Vec<DeviceGroup>>,
    active_device_group:
        Memo<(Arc<BTreeMap<String, DeviceGroup>>, Option<String>), Option<DeviceGroup>>,
    active_group_conditions: Memo<Arc<Option<DeviceGroup>>, Vec<Condition>>,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device groups as a display list, sorted by display name then id.
    /// Storage order is map order; presentation order is recovered here.
    pub fn device_groups(&self, state: &AppState) -> Arc<Vec<DeviceGroup>> {
        self.device_groups.get(Arc::clone(&state.device_groups), |map| {
            let mut groups: Vec<DeviceGroup> = map.values().cloned().collect();
            groups.sort_by(|a, b| {
                a.display_name
                    .cmp(&b.display_name)
                    .then_with(|| a.id.cmp(&b.id))
            });
            groups
        })
    }

    /// The record the current selection points at.
    pub fn active_device_group(&self, state: &AppState) -> Arc<Option<DeviceGroup>> {
        self.active_device_group.get(
            (
                Arc::clone(&state.device_groups),
                state.active_device_group_id.clone(),
            ),
            |(map, id)| id.as_ref().and_then(|id| map.get(id).cloned()),
        )
    }

    /// Conditions of the active group. Depends on `active_device_group`'s
    /// output by reference, so it recomputes only when that join changed.
    pub fn active_group_conditions(&self, state: &AppState) -> Arc<Vec<Condition>> {
        let active = self.active_device_group(state);
        self.active_group_conditions
            .get(active, |active| match &**active {
                Some(group) => group.conditions.clone(),
                None => Vec::new(),
            })
    }
}

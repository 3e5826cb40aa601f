// ── Reducers ──
//
// `reduce` is the only way console state changes. It is a pure, total
// function over the closed `Action` type: no I/O, no clocks, no await
// points. Timestamps ride in on actions so that replaying a sequence of
// actions always reproduces the same state.

use std::sync::Arc;

use super::AppState;
use super::action::Action;

/// Apply one action to the state, returning the next state.
///
/// Snapshots taken before the call stay valid: collections are shared via
/// `Arc` and cloned on first write, so an untouched collection keeps its
/// identity across unrelated actions.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    // Shared pending/error bookkeeping over the declared operation sets.
    if let Some(operation) = action.request_of() {
        next.statuses.begin(operation);
    }
    if let Some(operation) = action.success_of() {
        next.statuses.settle_ok(operation);
    }

    match action {
        // Requests and the initialize fan-out touch nothing beyond their
        // status entry; their effects arrive later as completions.
        Action::Initialize
        | Action::FetchDeviceGroups
        | Action::FetchFilters
        | Action::FetchMapsKey
        | Action::FetchLogo
        | Action::FetchRelease
        | Action::InsertDeviceGroup { .. }
        | Action::UpdateDeviceGroup { .. }
        | Action::DeleteDeviceGroup { .. }
        | Action::SetLogo { .. } => {}

        Action::SelectDeviceGroup { id } => {
            // Selecting an unknown id stores no selection at all.
            next.active_device_group_id =
                id.clone().filter(|id| next.device_groups.contains_key(id));
        }

        Action::SetTheme { theme } => next.theme = *theme,

        Action::DeviceGroupsFetched { groups, fetched_at } => {
            next.device_groups = Arc::new(groups.clone());
            next.last_groups_refresh = Some(*fetched_at);
            prune_selection(&mut next);
        }

        Action::DeviceGroupInserted { group } => {
            Arc::make_mut(&mut next.device_groups).insert(group.id.clone(), group.clone());
        }

        Action::DeviceGroupsUpserted { groups } => {
            if !groups.is_empty() {
                let map = Arc::make_mut(&mut next.device_groups);
                for group in groups {
                    map.insert(group.id.clone(), group.clone());
                }
            }
        }

        Action::DeviceGroupDeleted { id } => {
            // An absent key is a no-op that keeps the map's identity, so
            // memoized reads stay valid.
            if next.device_groups.contains_key(id) {
                Arc::make_mut(&mut next.device_groups).remove(id);
                prune_selection(&mut next);
            }
        }

        Action::FiltersFetched { filters } => {
            next.device_group_filters = Arc::new(filters.clone());
        }

        Action::MapsKeyFetched { key } => next.maps_key = key.clone(),

        Action::LogoFetched { branding } | Action::LogoUpdated { branding } => {
            next.branding = branding.clone();
        }

        Action::ReleaseFetched { release } => next.release = Some(release.clone()),

        Action::OperationFailed { operation, error } => {
            next.statuses.settle_err(*operation, error.clone());
        }
    }

    next
}

/// Drop a selection that no longer names an entry, keeping the invariant
/// that `active_device_group_id` always resolves.
fn prune_selection(state: &mut AppState) {
    let dangling = state
        .active_device_group_id
        .as_ref()
        .is_some_and(|id| !state.device_groups.contains_key(id));
    if dangling {
        state.active_device_group_id = None;
    }
}

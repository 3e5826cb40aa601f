// ── Epic runner ──
//
// One epic performs exactly one remote call and settles into exactly one
// completion action; the single return value is what enforces that
// contract. Failures never escape: they are rendered into
// `Action::OperationFailed` right here, at the boundary.

use chrono::Utc;
use tracing::warn;

use remon_api::{ConfigClient, ReleaseClient};

use crate::convert;
use crate::model::{Branding, DeviceGroupDraft, LogoDraft};
use crate::store::{Action, Epic, ErrorInfo, Operation};

/// Clients shared by every spawned epic.
#[derive(Clone)]
pub(crate) struct Services {
    pub config: ConfigClient,
    pub release: ReleaseClient,
}

/// Run one epic to its completion action.
pub(crate) async fn run(services: &Services, epic: Epic) -> Action {
    match epic {
        Epic::FetchDeviceGroups => fetch_device_groups(services).await,
        Epic::FetchFilters => fetch_filters(services).await,
        Epic::FetchMapsKey => fetch_maps_key(services).await,
        Epic::FetchLogo => fetch_logo(services).await,
        Epic::FetchRelease => fetch_release(services).await,
        Epic::InsertDeviceGroup { draft } => insert_device_group(services, &draft).await,
        Epic::UpdateDeviceGroup { id, draft, e_tag } => {
            update_device_group(services, &id, &draft, e_tag.as_deref()).await
        }
        Epic::DeleteDeviceGroup { id } => delete_device_group(services, id).await,
        Epic::SetLogo { draft } => set_logo(services, draft).await,
    }
}

async fn fetch_device_groups(services: &Services) -> Action {
    match services.config.list_device_groups().await {
        Ok(items) => Action::DeviceGroupsFetched {
            groups: convert::device_groups_from_wire(items),
            fetched_at: Utc::now(),
        },
        Err(err) => fail(Operation::FetchDeviceGroups, &err),
    }
}

async fn fetch_filters(services: &Services) -> Action {
    match services.config.list_device_group_filters().await {
        Ok(filters) => Action::FiltersFetched { filters },
        Err(err) => fail(Operation::FetchFilters, &err),
    }
}

async fn fetch_maps_key(services: &Services) -> Action {
    match services.config.get_theme().await {
        Ok(theme) => Action::MapsKeyFetched {
            key: convert::maps_key_from_theme(theme),
        },
        Err(err) => fail(Operation::FetchMapsKey, &err),
    }
}

async fn fetch_logo(services: &Services) -> Action {
    match services.config.get_logo().await {
        Ok(response) => Action::LogoFetched {
            branding: Branding::from(response),
        },
        Err(err) => fail(Operation::FetchLogo, &err),
    }
}

async fn set_logo(services: &Services, draft: LogoDraft) -> Action {
    match services.config.set_logo(&draft.into()).await {
        Ok(response) => Action::LogoUpdated {
            branding: Branding::from(response),
        },
        Err(err) => fail(Operation::SetLogo, &err),
    }
}

async fn insert_device_group(services: &Services, draft: &DeviceGroupDraft) -> Action {
    let body = convert::group_write(draft, None);
    match services.config.create_device_group(&body).await {
        Ok(resource) => match convert::device_group_from_wire(resource) {
            Some(group) => Action::DeviceGroupInserted { group },
            None => malformed(Operation::InsertDeviceGroup),
        },
        Err(err) => fail(Operation::InsertDeviceGroup, &err),
    }
}

async fn update_device_group(
    services: &Services,
    id: &str,
    draft: &DeviceGroupDraft,
    e_tag: Option<&str>,
) -> Action {
    let body = convert::group_write(draft, e_tag);
    match services.config.update_device_group(id, &body).await {
        Ok(resource) => match convert::device_group_from_wire(resource) {
            Some(group) => Action::DeviceGroupsUpserted {
                groups: vec![group],
            },
            None => malformed(Operation::UpdateDeviceGroup),
        },
        Err(err) => fail(Operation::UpdateDeviceGroup, &err),
    }
}

async fn delete_device_group(services: &Services, id: String) -> Action {
    match services.config.delete_device_group(&id).await {
        Ok(()) => Action::DeviceGroupDeleted { id },
        Err(err) => fail(Operation::DeleteDeviceGroup, &err),
    }
}

async fn fetch_release(services: &Services) -> Action {
    match services.release.latest_release().await {
        Ok(resource) => match convert::release_info_from_wire(resource) {
            Some(release) => Action::ReleaseFetched { release },
            None => {
                warn!("release feed returned no usable tag");
                Action::OperationFailed {
                    operation: Operation::FetchRelease,
                    error: ErrorInfo::other("release feed returned no usable tag"),
                }
            }
        },
        Err(err) => fail(Operation::FetchRelease, &err),
    }
}

fn fail(operation: Operation, err: &remon_api::Error) -> Action {
    warn!(%operation, error = %err, "epic failed");
    Action::OperationFailed {
        operation,
        error: ErrorInfo::from(err),
    }
}

fn malformed(operation: Operation) -> Action {
    warn!(%operation, "service returned a device group without an id");
    Action::OperationFailed {
        operation,
        error: ErrorInfo::other("service returned a device group without an id"),
    }
}

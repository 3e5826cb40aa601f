#![allow(clippy::unwrap_used)]
// End-to-end tests for the `Console` dispatch loop against a wiremock
// stand-in for the configuration service and the release feed.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::sync::watch;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use remon_core::{
    AppState, Condition, ConditionOperator, Console, ConsoleConfig, DeviceGroupDraft, Error,
    ErrorKind, LogoDraft, Operation, Theme, selector,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Console) {
    let server = MockServer::start().await;
    let config = ConsoleConfig {
        service_url: server.uri(),
        release_feed_url: server.uri(),
        timeout: Duration::from_secs(5),
        ..ConsoleConfig::default()
    };
    let console = Console::new(config).unwrap();
    (server, console)
}

/// Follow published snapshots until `done` holds, then return the state.
async fn wait_until(
    rx: &mut watch::Receiver<Arc<AppState>>,
    mut done: impl FnMut(&AppState) -> bool,
) -> Arc<AppState> {
    timeout(Duration::from_secs(5), async {
        loop {
            let settled = done(&rx.borrow_and_update());
            if settled {
                break;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("state did not settle in time");
    rx.borrow().clone()
}

fn group_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "displayName": name,
        "conditions": [
            { "key": "properties.reported.type", "operator": "EQ", "value": "chiller" }
        ],
        "eTag": "\"0001\""
    })
}

fn draft(name: &str) -> DeviceGroupDraft {
    DeviceGroupDraft {
        display_name: name.into(),
        conditions: vec![Condition {
            key: "properties.reported.type".into(),
            operator: ConditionOperator::Eq,
            value: json!("chiller"),
        }],
    }
}

async fn mount_group_list(server: &MockServer, items: Value) {
    Mock::given(method("GET"))
        .and(path("/devicegroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

// ── Startup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_populates_every_slice() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    mount_group_list(
        &server,
        json!([
            group_json("grp-1", "Chillers"),
            group_json("grp-2", "Ambient sensors")
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/devicegroupfilters"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "reported": ["type", "firmware"] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solution-settings/theme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AzureMapsKey": "maps-key-123"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solution-settings/logo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("IsDefault", "False")
                .insert_header("Name", "Contoso Ops")
                .set_body_raw(b"<svg/>".to_vec(), "image/svg+xml"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v2.0.1",
            "html_url": "https://example.com/releases/v2.0.1"
        })))
        .mount(&server)
        .await;

    console.initialize().unwrap();

    // Each clause tracks one of the five fan-out completions.
    let state = wait_until(&mut rx, |state| {
        !state.device_groups.is_empty()
            && state.maps_key.is_some()
            && !state.branding.is_default_logo
            && state.release.is_some()
            && !state.device_group_filters.is_null()
    })
    .await;

    assert_eq!(state.device_groups.len(), 2);
    let chillers = &state.device_groups["grp-1"];
    assert_eq!(chillers.display_name, "Chillers");
    assert_eq!(chillers.e_tag.as_deref(), Some("\"0001\""));
    assert_eq!(chillers.conditions[0].operator, ConditionOperator::Eq);

    assert_eq!(selector::maps_key(&state), Some("maps-key-123"));
    assert_eq!(state.branding.name, "Contoso Ops");
    assert_eq!(&state.branding.logo[..], b"<svg/>".as_slice());

    let release = state.release.clone().unwrap();
    assert_eq!(release.version, "2.0.1");
    assert_eq!(release.release_notes_url, "https://example.com/releases/v2.0.1");

    assert_eq!(
        *state.device_group_filters,
        json!({ "reported": ["type", "firmware"] })
    );

    assert_eq!(state.active_device_group_id, None);
    assert!(state.last_groups_refresh.is_some());
    assert!(!state.statuses.any_pending());
    assert!(selector::error(&state, Operation::FetchDeviceGroups).is_none());

    console.shutdown().await;
}

// ── Refresh failures ────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_refresh_keeps_cached_groups() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    // First call succeeds, every later one fails.
    Mock::given(method("GET"))
        .and(path("/devicegroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [group_json("grp-1", "Chillers")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/devicegroups"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "Message": "Storage unavailable"
        })))
        .mount(&server)
        .await;

    console.fetch_device_groups().unwrap();
    let state = wait_until(&mut rx, |state| !state.device_groups.is_empty()).await;
    assert_eq!(state.device_groups.len(), 1);

    console.fetch_device_groups().unwrap();
    let state = wait_until(&mut rx, |state| {
        selector::error(state, Operation::FetchDeviceGroups).is_some()
    })
    .await;

    // The stale cache stays; only the status slice records the failure.
    assert_eq!(state.device_groups.len(), 1);
    let err = selector::error(&state, Operation::FetchDeviceGroups).unwrap();
    assert_eq!(err.kind, ErrorKind::Api);
    assert!(
        err.message.contains("Storage unavailable"),
        "got: {}",
        err.message
    );
    assert!(!selector::pending(&state, Operation::FetchDeviceGroups));

    console.shutdown().await;
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_lands_in_the_cache() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    Mock::given(method("POST"))
        .and(path("/devicegroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(group_json("grp-9", "Chillers")))
        .mount(&server)
        .await;

    console.insert_device_group(draft("Chillers")).unwrap();

    let state = wait_until(&mut rx, |state| state.device_groups.contains_key("grp-9")).await;
    let created = &state.device_groups["grp-9"];
    assert_eq!(created.display_name, "Chillers");
    assert_eq!(created.e_tag.as_deref(), Some("\"0001\""));
    assert!(selector::error(&state, Operation::InsertDeviceGroup).is_none());

    console.shutdown().await;
}

#[tokio::test]
async fn test_delete_clears_the_selection() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    mount_group_list(&server, json!([group_json("grp-1", "Chillers")])).await;
    Mock::given(method("DELETE"))
        .and(path("/devicegroups/grp-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    console.fetch_device_groups().unwrap();
    wait_until(&mut rx, |state| state.device_groups.contains_key("grp-1")).await;

    console.select_device_group(Some("grp-1".into())).unwrap();
    let state = wait_until(&mut rx, |state| state.active_device_group_id.is_some()).await;
    assert_eq!(state.active_device_group_id.as_deref(), Some("grp-1"));

    console.delete_device_group("grp-1").unwrap();
    let state = wait_until(&mut rx, |state| state.device_groups.is_empty()).await;
    assert_eq!(state.active_device_group_id, None);

    console.shutdown().await;
}

#[tokio::test]
async fn test_rejected_update_leaves_the_record_alone() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    mount_group_list(&server, json!([group_json("grp-1", "Chillers")])).await;
    Mock::given(method("PUT"))
        .and(path("/devicegroups/grp-1"))
        .respond_with(ResponseTemplate::new(412).set_body_json(json!({
            "Message": "ETag mismatch"
        })))
        .mount(&server)
        .await;

    console.fetch_device_groups().unwrap();
    wait_until(&mut rx, |state| state.device_groups.contains_key("grp-1")).await;

    console
        .update_device_group("grp-1", draft("Freezers"), Some("\"0000\"".into()))
        .unwrap();
    let state = wait_until(&mut rx, |state| {
        selector::error(state, Operation::UpdateDeviceGroup).is_some()
    })
    .await;

    assert_eq!(state.device_groups["grp-1"].display_name, "Chillers");
    let err = selector::error(&state, Operation::UpdateDeviceGroup).unwrap();
    assert_eq!(err.kind, ErrorKind::Api);
    assert!(err.message.contains("ETag mismatch"), "got: {}", err.message);

    console.shutdown().await;
}

// ── Local validation ────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_wire() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/devicegroups"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = console.insert_device_group(DeviceGroupDraft {
        display_name: "   ".into(),
        conditions: vec![],
    });

    assert!(
        matches!(result, Err(Error::Validation { .. })),
        "got: {result:?}"
    );
    assert!(selector::error(&console.snapshot(), Operation::InsertDeviceGroup).is_none());

    console.shutdown().await;
    server.verify().await;
}

// ── Branding ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logo_upload_replaces_branding() {
    let (server, console) = setup().await;
    let mut rx = console.subscribe();

    Mock::given(method("PUT"))
        .and(path("/solution-settings/logo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("IsDefault", "False")
                .insert_header("Name", "Contoso Ops")
                .set_body_raw(b"<svg/>".to_vec(), "image/svg+xml"),
        )
        .mount(&server)
        .await;

    console
        .set_logo(LogoDraft {
            image: Some(Bytes::from_static(b"<svg/>")),
            content_type: Some("image/svg+xml".into()),
            name: Some("Contoso Ops".into()),
        })
        .unwrap();

    let state = wait_until(&mut rx, |state| !state.branding.is_default_logo).await;
    assert_eq!(state.branding.name, "Contoso Ops");
    assert_eq!(state.branding.content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(&state.branding.logo[..], b"<svg/>".as_slice());
    assert!(!selector::pending(&state, Operation::SetLogo));

    console.shutdown().await;
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_clones_share_one_store() {
    let (_server, console) = setup().await;
    let clone = console.clone();
    let mut rx = clone.subscribe();

    console.set_theme(Theme::Light).unwrap();
    let state = wait_until(&mut rx, |state| state.theme == Theme::Light).await;
    assert_eq!(selector::theme(&state), Theme::Light);

    console.shutdown().await;
}

#[tokio::test]
async fn test_dispatch_after_shutdown_is_rejected() {
    let (_server, console) = setup().await;

    console.shutdown().await;

    let result = console.fetch_device_groups();
    assert!(matches!(result, Err(Error::ConsoleClosed)), "got: {result:?}");

    // A second shutdown is a no-op.
    console.shutdown().await;
}

// ── Console dispatcher ──
//
// The `Console` owns the store and drives epics. A single apply task
// drains the action channel in dispatch order, reduces each action,
// publishes a state snapshot, and spawns one task per triggered epic.
// Epic completions re-enter the same channel, so the store only ever
// changes on that one task.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use remon_api::{ConfigClient, ReleaseClient};

use crate::config::ConsoleConfig;
use crate::epic::{self, Services};
use crate::error::Error;
use crate::model::{DeviceGroupDraft, LogoDraft, Theme};
use crate::store::{Action, AppState, Store};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Explicitly constructed, explicitly shut
/// down; dropping the last clone cancels the apply task without waiting
/// for it.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    actions: mpsc::UnboundedSender<Action>,
    snapshot_rx: watch::Receiver<Arc<AppState>>,
    cancel: CancellationToken,
    apply_task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for ConsoleInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Console {
    /// Create a console and start its apply task.
    ///
    /// Must be called within a tokio runtime. Touches the network only
    /// once an action is dispatched.
    pub fn new(config: ConsoleConfig) -> Result<Self, Error> {
        let transport = config.transport_options();
        let config_client = ConfigClient::new(&config.service_url, &transport)?;
        let release_client = ReleaseClient::new(&config.release_feed_url, &transport)?;
        let services = Arc::new(Services {
            config: config_client,
            release: release_client,
        });

        let (actions, action_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(AppState::default()));
        let cancel = CancellationToken::new();

        let apply_task = tokio::spawn(apply_loop(
            Store::new(AppState::default()),
            action_rx,
            actions.clone(),
            snapshot_tx,
            services,
            cancel.clone(),
        ));
        info!(service_url = %config.service_url, "console started");

        Ok(Self {
            inner: Arc::new(ConsoleInner {
                config,
                actions,
                snapshot_rx,
                cancel,
                apply_task: Mutex::new(Some(apply_task)),
            }),
        })
    }

    /// Access the console configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Queue one action for the apply task.
    ///
    /// Actions are applied strictly in dispatch order. Fails only after
    /// `shutdown`.
    pub fn dispatch(&self, action: Action) -> Result<(), Error> {
        if self.inner.cancel.is_cancelled() {
            return Err(Error::ConsoleClosed);
        }
        self.inner
            .actions
            .send(action)
            .map_err(|_| Error::ConsoleClosed)
    }

    /// Latest published state snapshot.
    pub fn snapshot(&self) -> Arc<AppState> {
        self.inner.snapshot_rx.borrow().clone()
    }

    /// Watch state changes. Every applied action publishes a fresh
    /// snapshot `Arc`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.snapshot_rx.clone()
    }

    // ── Typed dispatch helpers ───────────────────────────────────────

    /// Kick off the startup fan-out: reset the selection and fetch the
    /// map key, device groups, filters, logo, and release info, all
    /// independently.
    pub fn initialize(&self) -> Result<(), Error> {
        self.dispatch(Action::Initialize)
    }

    pub fn fetch_device_groups(&self) -> Result<(), Error> {
        self.dispatch(Action::FetchDeviceGroups)
    }

    pub fn fetch_filters(&self) -> Result<(), Error> {
        self.dispatch(Action::FetchFilters)
    }

    pub fn fetch_maps_key(&self) -> Result<(), Error> {
        self.dispatch(Action::FetchMapsKey)
    }

    pub fn fetch_logo(&self) -> Result<(), Error> {
        self.dispatch(Action::FetchLogo)
    }

    pub fn fetch_release(&self) -> Result<(), Error> {
        self.dispatch(Action::FetchRelease)
    }

    /// Create a device group from a draft.
    ///
    /// Validates locally first; an invalid draft is rejected here and
    /// nothing is dispatched or sent over the wire.
    pub fn insert_device_group(&self, draft: DeviceGroupDraft) -> Result<(), Error> {
        draft.validate()?;
        self.dispatch(Action::InsertDeviceGroup { draft })
    }

    /// Replace a device group's name and conditions.
    ///
    /// Pass the `e_tag` from the cached record so the service can reject
    /// writes against a stale revision. Validates locally first.
    pub fn update_device_group(
        &self,
        id: impl Into<String>,
        draft: DeviceGroupDraft,
        e_tag: Option<String>,
    ) -> Result<(), Error> {
        draft.validate()?;
        self.dispatch(Action::UpdateDeviceGroup {
            id: id.into(),
            draft,
            e_tag,
        })
    }

    pub fn delete_device_group(&self, id: impl Into<String>) -> Result<(), Error> {
        self.dispatch(Action::DeleteDeviceGroup { id: id.into() })
    }

    /// Upload a replacement logo, or clear the custom logo when the
    /// draft carries no image.
    pub fn set_logo(&self, draft: LogoDraft) -> Result<(), Error> {
        self.dispatch(Action::SetLogo { draft })
    }

    pub fn select_device_group(&self, id: Option<String>) -> Result<(), Error> {
        self.dispatch(Action::SelectDeviceGroup { id })
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), Error> {
        self.dispatch(Action::SetTheme { theme })
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Stop applying actions and wait for the apply task to finish.
    ///
    /// Idempotent. In-flight HTTP calls are not aborted; completions
    /// that arrive later are discarded, like a detached consumer.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = self.inner.apply_task.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        info!("console shut down");
    }
}

// ── Apply task ──────────────────────────────────────────────────────

async fn apply_loop(
    mut store: Store,
    mut actions: mpsc::UnboundedReceiver<Action>,
    loopback: mpsc::UnboundedSender<Action>,
    snapshots: watch::Sender<Arc<AppState>>,
    services: Arc<Services>,
    cancel: CancellationToken,
) {
    loop {
        let action = tokio::select! {
            () = cancel.cancelled() => break,
            next = actions.recv() => match next {
                Some(action) => action,
                None => break,
            },
        };

        if matches!(action, Action::Initialize) {
            fan_out(&loopback);
        }

        store.dispatch(&action);
        let _ = snapshots.send(Arc::new(store.state().clone()));

        if let Some(epic) = action.epic() {
            let services = Arc::clone(&services);
            let completions = loopback.clone();
            tokio::spawn(async move {
                let completion = epic::run(&services, epic).await;
                // The console may be gone by the time the call settles;
                // a closed channel just discards the completion.
                let _ = completions.send(completion);
            });
        }
    }
    debug!("console apply task stopped");
}

/// Queue the startup actions behind `Initialize`: a selection reset plus
/// the five independent fetches. No ordering among their completions.
fn fan_out(actions: &mpsc::UnboundedSender<Action>) {
    let _ = actions.send(Action::SelectDeviceGroup { id: None });
    for request in [
        Action::FetchMapsKey,
        Action::FetchDeviceGroups,
        Action::FetchFilters,
        Action::FetchLogo,
        Action::FetchRelease,
    ] {
        let _ = actions.send(request);
    }
}

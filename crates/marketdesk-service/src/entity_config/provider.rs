//! Entity configuration provider.
//!
//! Loads the admin entity configuration list once per mount. Only users
//! whose role is listed in `entity_config.admin_roles` trigger a fetch, and
//! the fetch waits `entity_config.fetch_delay_ms` first. Unmounting cancels
//! the pending delay or fetch and suppresses every later state write.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use marketdesk_core::config::EntityConfigSettings;
use marketdesk_entity::entity_config::EntityConfig;

use super::source::{ConfigSource, CurrentUserSource, coerce_configs};

/// Where the provider is in its load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No load has started.
    Idle,
    /// Waiting for the delay or the fetch.
    Loading,
    /// Finished, possibly with an empty list.
    Loaded,
    /// The fetch failed.
    Failed,
}

/// Snapshot of the provider state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityConfigState {
    /// Where the load currently is.
    pub phase: LoadPhase,
    /// Loaded configs; empty unless the phase is `Loaded`.
    pub configs: Vec<EntityConfig>,
    /// Set only while loading.
    pub is_loading: bool,
    /// Failure message when the phase is `Failed`.
    pub error: Option<String>,
}

impl EntityConfigState {
    /// Nothing loaded and nothing in flight.
    pub fn idle() -> Self {
        Self {
            phase: LoadPhase::Idle,
            configs: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            is_loading: true,
            ..Self::idle()
        }
    }

    fn loaded(configs: Vec<EntityConfig>) -> Self {
        Self {
            phase: LoadPhase::Loaded,
            configs,
            ..Self::idle()
        }
    }

    fn failed(message: String) -> Self {
        Self {
            phase: LoadPhase::Failed,
            error: Some(message),
            ..Self::idle()
        }
    }
}

impl Default for EntityConfigState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Handle to a mounted provider. Dropping it unmounts.
#[derive(Debug)]
pub struct EntityConfigProvider {
    state: watch::Receiver<EntityConfigState>,
    cancel: CancellationToken,
}

impl EntityConfigProvider {
    /// Mount the provider and start its load on the current runtime.
    ///
    /// The returned handle is already in the `Loading` phase.
    pub fn mount(
        users: Arc<dyn CurrentUserSource>,
        source: Arc<dyn ConfigSource>,
        settings: EntityConfigSettings,
    ) -> Self {
        let (tx, rx) = watch::channel(EntityConfigState::loading());
        let cancel = CancellationToken::new();

        tokio::spawn(load(users, source, settings, tx, cancel.clone()));

        Self { state: rx, cancel }
    }

    /// Current state.
    pub fn state(&self) -> EntityConfigState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<EntityConfigState> {
        self.state.clone()
    }

    /// Wait until loading finishes, or the load is abandoned.
    pub async fn loaded(&self) -> EntityConfigState {
        let mut rx = self.state.clone();
        let finished = rx.wait_for(|s| !s.is_loading).await.map(|s| s.clone());
        match finished {
            Ok(state) => state,
            Err(_) => rx.borrow().clone(),
        }
    }

    /// Does nothing; configs load once per mount.
    pub fn refresh(&self) {
        debug!("Entity config refresh requested; configs load once per mount");
    }

    /// Whether the provider is still mounted.
    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Tear the provider down, cancelling any pending load.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for EntityConfigProvider {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn load(
    users: Arc<dyn CurrentUserSource>,
    source: Arc<dyn ConfigSource>,
    settings: EntityConfigSettings,
    state: watch::Sender<EntityConfigState>,
    cancel: CancellationToken,
) {
    let user = tokio::select! {
        biased;
        _ = cancel.cancelled() => return,
        user = users.current_user() => user.unwrap_or_else(|e| {
            debug!(error = %e, "Could not resolve current user; treating as signed out");
            None
        }),
    };

    let is_admin = user
        .as_ref()
        .is_some_and(|u| settings.is_admin_role(u.role.as_str()));
    if !is_admin {
        debug!("Current user is not an admin; skipping entity config fetch");
        publish(&state, &cancel, EntityConfigState::loaded(Vec::new()));
        return;
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Provider unmounted before entity config fetch");
            return;
        }
        _ = tokio::time::sleep(settings.fetch_delay()) => {}
    }

    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Provider unmounted during entity config fetch");
            return;
        }
        fetched = source.fetch_configs() => fetched,
    };

    let next = match fetched {
        Ok(payload) => {
            let configs = coerce_configs(payload);
            info!(count = configs.len(), "Loaded entity configs");
            EntityConfigState::loaded(configs)
        }
        Err(e) if e.is_cancelled() => EntityConfigState::loaded(Vec::new()),
        Err(e) => {
            error!(error = %e, "Failed to load entity configs");
            EntityConfigState::failed(e.message)
        }
    };
    publish(&state, &cancel, next);
}

fn publish(
    state: &watch::Sender<EntityConfigState>,
    cancel: &CancellationToken,
    next: EntityConfigState,
) {
    if cancel.is_cancelled() {
        return;
    }
    state.send_replace(next);
}
